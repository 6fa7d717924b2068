use crate::config::BoundaryMode;
use crate::input::{direction_change_is_valid, Direction};
use crate::snake::Position;
use crate::snapshot::Snapshot;

/// Greedy steering used by the headless driver in place of a player.
///
/// Picks the safe, non-reversing direction that brings the head closest
/// to the food. Distances are measured around the edges in wrap mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

impl Autopilot {
    /// Returns the direction to request before the next tick, or `None`
    /// when no neighbouring cell is safe.
    #[must_use]
    pub fn next_direction(&self, snapshot: &Snapshot, current: Direction) -> Option<Direction> {
        let head = snapshot.head()?;

        let mut best: Option<(Direction, u32)> = None;
        for direction in Direction::ALL {
            if !direction_change_is_valid(current, direction) {
                continue;
            }

            let Some(next) = next_cell(snapshot, head, direction) else {
                continue;
            };
            if snapshot.occupies(next) {
                continue;
            }

            let distance = snapshot
                .food
                .map_or(0, |food| distance(snapshot, next, food));
            // Ties keep the current heading so the snake does not zig-zag.
            let better = match best {
                None => true,
                Some((_, best_distance)) => {
                    distance < best_distance || (distance == best_distance && direction == current)
                }
            };
            if better {
                best = Some((direction, distance));
            }
        }

        best.map(|(direction, _)| direction)
    }
}

fn next_cell(snapshot: &Snapshot, head: Position, direction: Direction) -> Option<Position> {
    let raw = head.step(direction);
    match snapshot.boundary_mode {
        BoundaryMode::Wrap => Some(raw.wrapped(snapshot.grid_size)),
        BoundaryMode::Wall => raw.is_within_bounds(snapshot.grid_size).then_some(raw),
    }
}

fn distance(snapshot: &Snapshot, from: Position, to: Position) -> u32 {
    let size = u32::from(snapshot.grid_size);
    let axis = |a: i32, b: i32| {
        let direct = a.abs_diff(b);
        match snapshot.boundary_mode {
            BoundaryMode::Wrap => direct.min(size - direct),
            BoundaryMode::Wall => direct,
        }
    };

    axis(from.row, to.row) + axis(from.col, to.col)
}
