use super::entities::{Obstacle, Vehicle};
use crate::geom::Rect;

/// Vehicle hitbox: its bounds pulled in by `padding` on every side so grazing
/// contact with an obstacle corner doesn't end the run.
pub fn hitbox(vehicle: &Vehicle, padding: f64) -> Rect {
    vehicle.bounds().inset(padding)
}

pub fn collides(vehicle: &Vehicle, obstacle: &Obstacle, padding: f64) -> bool {
    hitbox(vehicle, padding).intersects(&obstacle.bounds())
}
