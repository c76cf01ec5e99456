use mate_core::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavPath {
    pub points: Vec<Vec3>,
}

impl NavPath {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    /// Total polyline length.
    pub fn length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum()
    }
}

pub trait Navigator {
    fn find_path(&self, start: Vec3, goal: Vec3) -> Option<NavPath>;

    /// Whether a point lies on navigable space. Backends without obstacles accept everything.
    fn is_walkable(&self, _point: Vec3) -> bool {
        true
    }
}

/// Obstacle-free navigator: every goal is reachable in a straight line.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenField;

impl Navigator for OpenField {
    fn find_path(&self, start: Vec3, goal: Vec3) -> Option<NavPath> {
        Some(NavPath::new(vec![start, goal]))
    }
}
