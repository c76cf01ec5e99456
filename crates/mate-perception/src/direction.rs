//! Eight 45° sectors around the agent's forward vector.
//!
//! Each sector owns its clockwise (upper) edge: `(-22.5, 22.5]` is ahead, `(-67.5, -22.5]` is
//! ahead-left, and so on, with behind covering `(157.5, 180] ∪ [-180, -157.5]`.

use core::fmt;

use mate_core::math::{bearing_degrees, forward, wrap_angle};
use mate_core::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const SECTOR_DEGREES: f32 = 45.0;
const HALF_SECTOR_DEGREES: f32 = 22.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Direction {
    Ahead,
    AheadRight,
    Right,
    BehindRight,
    Behind,
    BehindLeft,
    Left,
    AheadLeft,
}

impl Direction {
    /// Clockwise from ahead.
    pub const ALL: [Direction; 8] = [
        Direction::Ahead,
        Direction::AheadRight,
        Direction::Right,
        Direction::BehindRight,
        Direction::Behind,
        Direction::BehindLeft,
        Direction::Left,
        Direction::AheadLeft,
    ];

    /// Bucket a signed bearing in degrees (positive = right).
    pub fn from_bearing(degrees: f32) -> Self {
        let sector = ((degrees - HALF_SECTOR_DEGREES) / SECTOR_DEGREES).ceil() as i32;
        Self::ALL[sector.rem_euclid(8) as usize]
    }

    /// Direction of `target` as seen by an agent at `origin` facing `yaw`.
    ///
    /// A target straight above/below (no horizontal offset) counts as ahead.
    pub fn classify(origin: Vec3, yaw: f32, target: Vec3) -> Self {
        bearing_degrees(yaw, target - origin).map_or(Direction::Ahead, Self::from_bearing)
    }

    /// Parse a label, accepting `_` for `-` and a few colloquial aliases.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_ascii_lowercase().replace('_', "-");
        let direction = match label.as_str() {
            "ahead" | "forward" | "front" => Direction::Ahead,
            "ahead-right" => Direction::AheadRight,
            "right" => Direction::Right,
            "behind-right" => Direction::BehindRight,
            "behind" | "back" | "backward" => Direction::Behind,
            "behind-left" => Direction::BehindLeft,
            "left" => Direction::Left,
            "ahead-left" => Direction::AheadLeft,
            _ => return None,
        };
        Some(direction)
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Ahead => "ahead",
            Direction::AheadRight => "ahead-right",
            Direction::Right => "right",
            Direction::BehindRight => "behind-right",
            Direction::Behind => "behind",
            Direction::BehindLeft => "behind-left",
            Direction::Left => "left",
            Direction::AheadLeft => "ahead-left",
        }
    }

    /// Sector center in degrees, in `(-180, 180]`.
    pub fn center_degrees(self) -> f32 {
        let index = Self::ALL.iter().position(|d| *d == self).unwrap_or(0) as f32;
        let degrees = index * SECTOR_DEGREES;
        if degrees > 180.0 {
            degrees - 360.0
        } else {
            degrees
        }
    }

    /// Horizontal unit vector for this direction relative to a heading.
    pub fn to_world(self, yaw: f32) -> Vec3 {
        forward(wrap_angle(yaw + self.center_degrees().to_radians()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
