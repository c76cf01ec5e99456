use mate_core::Vec3;

use crate::{NavPath, Navigator};

/// Per-agent path follower: holds the active goal and advances along the path each tick.
///
/// This is the engine side of the [`crate::Pathfinding`] service in the reference world.
#[derive(Debug, Clone)]
pub struct NavAgent {
    speed: f32,
    goal: Option<Vec3>,
    path: Option<NavPath>,
    next_index: usize,
    valid: bool,
}

impl NavAgent {
    pub fn new(speed: f32) -> Self {
        Self {
            speed: speed.max(0.0),
            goal: None,
            path: None,
            next_index: 1,
            valid: true,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn goal(&self) -> Option<Vec3> {
        self.goal
    }

    pub fn has_path(&self) -> bool {
        self.path.is_some()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Plan a path to `goal`. On failure the previous path is dropped and `false` is returned.
    pub fn set_goal(&mut self, navigator: &dyn Navigator, from: Vec3, goal: Vec3) -> bool {
        self.clear();
        let Some(path) = navigator.find_path(from, goal) else {
            return false;
        };
        self.goal = Some(goal);
        self.path = Some(path);
        self.next_index = 1;
        true
    }

    pub fn clear(&mut self) {
        self.goal = None;
        self.path = None;
        self.next_index = 1;
        self.valid = true;
    }

    /// Path length still to travel from `position`.
    pub fn remaining_distance(&self, position: Vec3) -> Option<f32> {
        let path = self.path.as_ref()?;
        let mut remaining = 0.0;
        let mut current = position;
        for point in path.points.iter().skip(self.next_index) {
            remaining += current.distance(*point);
            current = *point;
        }
        Some(remaining)
    }

    /// Mark the path invalid when any point still ahead is no longer walkable.
    pub fn revalidate(&mut self, navigator: &dyn Navigator) {
        let Some(path) = &self.path else {
            return;
        };
        let blocked = path
            .points
            .iter()
            .skip(self.next_index)
            .any(|p| !navigator.is_walkable(*p));
        if blocked {
            if self.valid {
                tracing::debug!(goal = ?self.goal, "active path invalidated");
            }
            self.valid = false;
        }
    }

    /// Move along the path for `dt` seconds. Invalid or finished paths don't move.
    pub fn advance(&mut self, position: Vec3, dt: f32) -> Vec3 {
        if !self.valid {
            return position;
        }
        let Some(path) = &self.path else {
            return position;
        };

        let mut remaining = self.speed * dt.max(0.0);
        let mut current = position;
        while self.next_index < path.points.len() && remaining > 0.0 {
            let target = path.points[self.next_index];
            let to_target = target - current;
            let dist = to_target.length();

            if dist <= f32::EPSILON {
                self.next_index += 1;
                continue;
            }

            if remaining >= dist {
                current = target;
                self.next_index += 1;
                remaining -= dist;
                continue;
            }

            current = current + to_target * (remaining / dist);
            break;
        }

        current
    }
}
