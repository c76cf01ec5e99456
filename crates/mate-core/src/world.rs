use crate::{AgentCapability, AgentId, EntityId, Vec3, WorldEntity};

/// Read-only world access.
///
/// The core crate does not prescribe which queries a world must expose; subsystems define
/// extension traits (pose, entity registry here; pathfinding in `mate-nav`).
pub trait WorldView {
    type Agent: AgentId;
}

/// Write access / effect sink.
pub trait WorldMut: WorldView {}

/// Agent pose and limits as owned by the simulation.
pub trait AgentPose: WorldView {
    fn position(&self, agent: Self::Agent) -> Option<Vec3>;

    /// Heading in radians (see [`crate::math`] for conventions).
    fn yaw(&self, agent: Self::Agent) -> Option<f32>;

    fn capability(&self, _agent: Self::Agent) -> AgentCapability {
        AgentCapability::default()
    }
}

/// Orientation output. Translation is owned by the pathfinding service.
pub trait AgentPoseMut: WorldMut + AgentPose {
    fn set_yaw(&mut self, agent: Self::Agent, yaw: f32);
}

/// Entity registry / world query service.
pub trait EntityQuery: WorldView {
    fn entity(&self, id: EntityId) -> Option<WorldEntity>;

    /// Case-insensitive lookup by display name.
    fn find_by_name(&self, name: &str) -> Option<WorldEntity>;

    /// Entities within `radius` of `origin`, closest first (ties broken by id).
    fn nearby(&self, origin: Vec3, radius: f32) -> Vec<WorldEntity>;
}
