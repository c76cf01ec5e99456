use mate_core::{AgentPose, Vec3, WorldMut};

/// The pathfinding collaborator as seen by the core.
///
/// Motion itself belongs to the engine: after [`Pathfinding::navigate`] the world moves the
/// agent on its own ticks, and callers poll [`Pathfinding::remaining_distance`] and
/// [`Pathfinding::path_valid`].
pub trait Pathfinding: WorldMut + AgentPose {
    /// Pre-flight query: can a path to `goal` be built from the agent's position?
    fn reachable(&self, agent: Self::Agent, goal: Vec3) -> bool;

    /// Issue a navigation goal. Returns `false` when no path could be built.
    fn navigate(&mut self, agent: Self::Agent, goal: Vec3) -> bool;

    fn clear_path(&mut self, agent: Self::Agent);

    fn has_path(&self, agent: Self::Agent) -> bool;

    /// `false` once the active path has been invalidated mid-flight.
    fn path_valid(&self, agent: Self::Agent) -> bool;

    /// Path distance left to the active goal; `None` without a path.
    fn remaining_distance(&self, agent: Self::Agent) -> Option<f32>;
}
