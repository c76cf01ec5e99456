use std::collections::BTreeMap;

use mate_core::math::yaw_of;
use mate_core::{
    AgentCapability, AgentPose, AgentPoseMut, EntityId, EntityQuery, Vec3, WorldEntity, WorldMut,
    WorldView,
};
use mate_nav::{NavAgent, NavGrid, Navigator, OpenField, Pathfinding};

#[derive(Debug, Clone)]
enum Backend {
    Open(OpenField),
    Grid(NavGrid),
}

impl Backend {
    fn navigator(&self) -> &dyn Navigator {
        match self {
            Backend::Open(open) => open,
            Backend::Grid(grid) => grid,
        }
    }
}

/// Engine-side state of one agent.
#[derive(Debug, Clone)]
pub struct SimAgent {
    pub position: Vec3,
    pub yaw: f32,
    pub capability: AgentCapability,
    pub nav: NavAgent,
}

impl SimAgent {
    pub fn new(position: Vec3, yaw: f32, speed: f32) -> Self {
        Self {
            position,
            yaw,
            capability: AgentCapability::default(),
            nav: NavAgent::new(speed),
        }
    }

    pub fn with_capability(mut self, capability: AgentCapability) -> Self {
        self.capability = capability;
        self
    }
}

/// Walks a registry entity through waypoints at a fixed speed.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceMover {
    pub entity: EntityId,
    pub waypoints: Vec<Vec3>,
    pub speed: f32,
    pub looping: bool,
    next: usize,
}

impl ReferenceMover {
    pub fn new(entity: EntityId, waypoints: Vec<Vec3>, speed: f32, looping: bool) -> Self {
        Self {
            entity,
            waypoints,
            speed: speed.max(0.0),
            looping,
            next: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        !self.looping && self.next >= self.waypoints.len()
    }

    fn advance(&mut self, position: Vec3, dt: f32) -> Vec3 {
        let mut budget = self.speed * dt.max(0.0);
        let mut current = position;
        let mut idle_hops = 0;
        while budget > 0.0 && idle_hops < self.waypoints.len() {
            if self.next >= self.waypoints.len() {
                if !self.looping {
                    break;
                }
                self.next = 0;
            }
            let target = self.waypoints[self.next];
            let dist = current.distance(target);
            if dist <= budget {
                current = target;
                budget -= dist;
                self.next += 1;
                // A loop of coincident waypoints would never spend the budget.
                idle_hops = if dist <= f32::EPSILON { idle_hops + 1 } else { 0 };
            } else {
                current = current + (target - current) * (budget / dist);
                break;
            }
        }
        current
    }
}

/// In-memory world: agents driven by [`NavAgent`]s, an entity registry and a navigation backend.
///
/// The core only issues goals; [`SimWorld::step`] is the engine half that moves agents along
/// their paths, turns them to face their motion and walks scripted entities.
#[derive(Debug, Clone)]
pub struct SimWorld {
    agents: BTreeMap<u32, SimAgent>,
    entities: Vec<WorldEntity>,
    backend: Backend,
    movers: Vec<ReferenceMover>,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::open()
    }
}

impl SimWorld {
    pub fn open() -> Self {
        Self {
            agents: BTreeMap::new(),
            entities: Vec::new(),
            backend: Backend::Open(OpenField),
            movers: Vec::new(),
        }
    }

    pub fn with_grid(grid: NavGrid) -> Self {
        Self {
            backend: Backend::Grid(grid),
            ..Self::open()
        }
    }

    pub fn spawn_agent(&mut self, id: u32, agent: SimAgent) {
        self.agents.insert(id, agent);
    }

    pub fn agent(&self, id: u32) -> Option<&SimAgent> {
        self.agents.get(&id)
    }

    pub fn agent_mut(&mut self, id: u32) -> Option<&mut SimAgent> {
        self.agents.get_mut(&id)
    }

    /// Insert or replace an entity by id.
    pub fn insert_entity(&mut self, entity: WorldEntity) {
        match self.entities.iter_mut().find(|e| e.id == entity.id) {
            Some(existing) => *existing = entity,
            None => self.entities.push(entity),
        }
    }

    pub fn remove_entity(&mut self, id: EntityId) -> Option<WorldEntity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(index))
    }

    pub fn entities(&self) -> &[WorldEntity] {
        &self.entities
    }

    pub fn move_entity(&mut self, id: EntityId, position: Vec3) -> bool {
        match self.entities.iter_mut().find(|e| e.id == id) {
            Some(entity) => {
                entity.position = position;
                true
            }
            None => false,
        }
    }

    pub fn add_mover(&mut self, mover: ReferenceMover) {
        self.movers.push(mover);
    }

    /// Block or unblock a grid cell. No-op on an open field.
    pub fn set_blocked(&mut self, x: i32, z: i32, blocked: bool) {
        if let Backend::Grid(grid) = &mut self.backend {
            grid.set_blocked(x, z, blocked);
            tracing::debug!(x, z, blocked, "grid cell updated");
        }
    }

    pub fn is_walkable(&self, point: Vec3) -> bool {
        self.backend.navigator().is_walkable(point)
    }

    /// Engine tick: walk scripted entities, then move every agent along its path.
    pub fn step(&mut self, dt: f32) {
        for mover in &mut self.movers {
            let Some(entity) = self.entities.iter_mut().find(|e| e.id == mover.entity) else {
                continue;
            };
            entity.position = mover.advance(entity.position, dt);
        }

        let navigator = self.backend.navigator();
        for agent in self.agents.values_mut() {
            agent.nav.revalidate(navigator);
            let next = agent.nav.advance(agent.position, dt);
            if let Some(yaw) = yaw_of(next - agent.position) {
                agent.yaw = yaw;
            }
            agent.position = next;
        }
    }
}

impl WorldView for SimWorld {
    type Agent = u32;
}

impl WorldMut for SimWorld {}

impl AgentPose for SimWorld {
    fn position(&self, agent: u32) -> Option<Vec3> {
        self.agents.get(&agent).map(|a| a.position)
    }

    fn yaw(&self, agent: u32) -> Option<f32> {
        self.agents.get(&agent).map(|a| a.yaw)
    }

    fn capability(&self, agent: u32) -> AgentCapability {
        self.agents
            .get(&agent)
            .map(|a| a.capability)
            .unwrap_or_default()
    }
}

impl AgentPoseMut for SimWorld {
    fn set_yaw(&mut self, agent: u32, yaw: f32) {
        if let Some(a) = self.agents.get_mut(&agent) {
            a.yaw = yaw;
        }
    }
}

impl EntityQuery for SimWorld {
    fn entity(&self, id: EntityId) -> Option<WorldEntity> {
        self.entities.iter().find(|e| e.id == id).cloned()
    }

    fn find_by_name(&self, name: &str) -> Option<WorldEntity> {
        self.entities
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    fn nearby(&self, origin: Vec3, radius: f32) -> Vec<WorldEntity> {
        let mut found: Vec<(f32, &WorldEntity)> = self
            .entities
            .iter()
            .map(|e| (e.position.distance(origin), e))
            .filter(|(d, _)| *d <= radius)
            .collect();
        found.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.id.cmp(&b.1.id)));
        found.into_iter().map(|(_, e)| e.clone()).collect()
    }
}

impl Pathfinding for SimWorld {
    fn reachable(&self, agent: u32, goal: Vec3) -> bool {
        let Some(a) = self.agents.get(&agent) else {
            return false;
        };
        self.backend.navigator().find_path(a.position, goal).is_some()
    }

    fn navigate(&mut self, agent: u32, goal: Vec3) -> bool {
        let navigator = self.backend.navigator();
        let Some(a) = self.agents.get_mut(&agent) else {
            return false;
        };
        a.nav.set_goal(navigator, a.position, goal)
    }

    fn clear_path(&mut self, agent: u32) {
        if let Some(a) = self.agents.get_mut(&agent) {
            a.nav.clear();
        }
    }

    fn has_path(&self, agent: u32) -> bool {
        self.agents.get(&agent).is_some_and(|a| a.nav.has_path())
    }

    fn path_valid(&self, agent: u32) -> bool {
        self.agents.get(&agent).is_some_and(|a| a.nav.is_valid())
    }

    fn remaining_distance(&self, agent: u32) -> Option<f32> {
        let a = self.agents.get(&agent)?;
        a.nav.remaining_distance(a.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mover_walks_waypoints_and_stops() {
        let mut mover = ReferenceMover::new(
            EntityId(1),
            vec![Vec3::new(0.0, 0.0, 2.0), Vec3::new(2.0, 0.0, 2.0)],
            1.0,
            false,
        );
        let mut position = Vec3::ZERO;
        for _ in 0..3 {
            position = mover.advance(position, 1.0);
        }
        assert!(position.distance(Vec3::new(1.0, 0.0, 2.0)) < 1e-5);
        for _ in 0..5 {
            position = mover.advance(position, 1.0);
        }
        assert_eq!(position, Vec3::new(2.0, 0.0, 2.0));
        assert!(mover.is_done());
    }

    #[test]
    fn looping_mover_wraps() {
        let mut mover = ReferenceMover::new(
            EntityId(1),
            vec![Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO],
            1.0,
            true,
        );
        let mut position = Vec3::ZERO;
        position = mover.advance(position, 2.5);
        assert!(position.distance(Vec3::new(0.5, 0.0, 0.0)) < 1e-5);
        assert!(!mover.is_done());
    }
}
