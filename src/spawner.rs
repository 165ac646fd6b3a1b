use std::time::Duration;
use tokio::time;

use crate::layout::SpawnInstruction;

/// Feeds spawn instructions to `sink` one at a time, sleeping `delay`
/// between them. Returns how many were emitted.
pub async fn emit_paced<I, F>(sequence: I, delay: Duration, mut sink: F) -> usize
where
    I: IntoIterator<Item = SpawnInstruction>,
    F: FnMut(SpawnInstruction),
{
    let mut emitted = 0;
    for instruction in sequence {
        if emitted > 0 && !delay.is_zero() {
            time::sleep(delay).await;
        }
        sink(instruction);
        emitted += 1;
    }
    log::debug!("spawned {emitted} cells");
    emitted
}
