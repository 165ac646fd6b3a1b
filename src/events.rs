use glam::Vec3;

/// Game-flow signals exchanged between the session and its collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    LevelLoaded { level: u32 },
    RestartRequested,
    /// Fired once per level, after tiles and items are placed and before spawning.
    LayoutGenerated { level: u32, start_position: Vec3 },
}

type Subscriber = Box<dyn FnMut(&GameEvent)>;

/// Synchronous publish/subscribe bus. Every subscriber sees every event
/// exactly once, in subscription order, before `publish` returns.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.subscribers.push(Box::new(handler));
    }

    pub fn publish(&mut self, event: &GameEvent) {
        log::trace!("publishing {event:?} to {} subscribers", self.subscribers.len());
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_delivers_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        for id in 0..3 {
            let log = Rc::clone(&log);
            bus.subscribe(move |event| log.borrow_mut().push((id, event.clone())));
        }

        bus.publish(&GameEvent::LevelLoaded { level: 4 });

        let seen = log.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(
            seen.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert!(seen
            .iter()
            .all(|(_, e)| *e == GameEvent::LevelLoaded { level: 4 }));
    }

    #[test]
    fn test_late_subscriber_misses_earlier_events() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.publish(&GameEvent::RestartRequested);

        let sink = Rc::clone(&seen);
        bus.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        bus.publish(&GameEvent::LevelLoaded { level: 1 });

        assert_eq!(*seen.borrow(), vec![GameEvent::LevelLoaded { level: 1 }]);
    }
}
