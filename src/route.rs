use rand::Rng;
use std::collections::BTreeSet;

use crate::tiles::Coordinate;

/// Walk steps allowed per attempt, as a multiple of the cell count.
const STEP_BUDGET_PER_CELL: usize = 64;

/// Random route between `start` and `finish`, excluding both endpoints.
///
/// Each attempt is a random walk of axis-aligned unit steps that never
/// re-enters `start`. An attempt is discarded once it collects
/// `grid_size² / 2` cells or runs out of steps. After `max_attempts`
/// failures the straight route from [`fallback_route`] is returned.
pub fn find_random_route<R: Rng + ?Sized>(
    rng: &mut R,
    grid_size: u32,
    start: Coordinate,
    finish: Coordinate,
    max_attempts: u32,
) -> BTreeSet<Coordinate> {
    let length_limit = route_length_limit(grid_size);
    for attempt in 1..=max_attempts {
        if let Some(route) = random_walk(rng, grid_size, start, finish, length_limit) {
            log::trace!("route of {} cells found on attempt {attempt}", route.len());
            return route;
        }
    }
    log::warn!(
        "no random route under {length_limit} cells after {max_attempts} attempts, using straight route"
    );
    fallback_route(start, finish)
}

/// Routes must stay strictly below this many cells.
pub fn route_length_limit(grid_size: u32) -> usize {
    (grid_size * grid_size / 2) as usize
}

fn random_walk<R: Rng + ?Sized>(
    rng: &mut R,
    grid_size: u32,
    start: Coordinate,
    finish: Coordinate,
    length_limit: usize,
) -> Option<BTreeSet<Coordinate>> {
    let step_budget = STEP_BUDGET_PER_CELL * (grid_size * grid_size) as usize;
    let mut route = BTreeSet::new();
    let mut current = start;

    for _ in 0..step_budget {
        if current == finish {
            return Some(route);
        }
        let next = loop {
            let (dx, dy) = random_step(rng, grid_size, current);
            let candidate = current.offset(dx, dy);
            if candidate != start {
                break candidate;
            }
        };
        current = next;
        if current != finish {
            route.insert(current);
            if route.len() >= length_limit {
                return None;
            }
        }
    }
    (current == finish).then_some(route)
}

/// One step along exactly one axis that stays inside the grid.
fn random_step<R: Rng + ?Sized>(rng: &mut R, grid_size: u32, from: Coordinate) -> (i32, i32) {
    let last = grid_size - 1;
    loop {
        let dx = rng.gen_range(axis_range(from.x, last));
        let dy = rng.gen_range(axis_range(from.y, last));
        if (dx == 0) != (dy == 0) {
            return (dx, dy);
        }
    }
}

fn axis_range(position: u32, last: u32) -> std::ops::RangeInclusive<i32> {
    let low = if position == 0 { 0 } else { -1 };
    let high = if position == last { 0 } else { 1 };
    low..=high
}

/// Straight route: along the start column to the finish row, then along that
/// row to the finish column.
pub fn fallback_route(start: Coordinate, finish: Coordinate) -> BTreeSet<Coordinate> {
    let mut route = BTreeSet::new();
    let mut current = start;
    while current != finish {
        current = if current.y != finish.y {
            Coordinate::new(current.x, step_toward(current.y, finish.y))
        } else {
            Coordinate::new(step_toward(current.x, finish.x), current.y)
        };
        if current != finish {
            route.insert(current);
        }
    }
    route
}

fn step_toward(from: u32, to: u32) -> u32 {
    if from < to {
        from + 1
    } else {
        from - 1
    }
}
