#![allow(dead_code)]

use mate_core::{
    AgentCapability, AgentPose, AgentPoseMut, EntityId, EntityQuery, TickContext, Vec3,
    WorldEntity, WorldMut, WorldView,
};
use mate_nav::{NavAgent, NavGrid, Navigator, OpenField, Pathfinding};

/// One agent on an open field (or a grid), moved by a [`NavAgent`] after each tick.
pub struct TestWorld {
    pub position: Vec3,
    pub yaw: f32,
    pub capability: AgentCapability,
    pub nav: NavAgent,
    pub grid: Option<NavGrid>,
    pub entities: Vec<WorldEntity>,
    pub yaw_writes: usize,
}

impl TestWorld {
    pub fn new(speed: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            capability: AgentCapability::default(),
            nav: NavAgent::new(speed),
            grid: None,
            entities: Vec::new(),
            yaw_writes: 0,
        }
    }

    pub fn with_grid(mut self, grid: NavGrid) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn with_entity(mut self, entity: WorldEntity) -> Self {
        self.entities.push(entity);
        self
    }

    fn navigator(&self) -> &dyn Navigator {
        match &self.grid {
            Some(grid) => grid,
            None => &OpenField,
        }
    }

    /// Engine side: move along the active path.
    pub fn step(&mut self, dt: f32) {
        match &self.grid {
            Some(grid) => self.nav.revalidate(grid),
            None => self.nav.revalidate(&OpenField),
        }
        self.position = self.nav.advance(self.position, dt);
    }
}

impl WorldView for TestWorld {
    type Agent = u32;
}

impl WorldMut for TestWorld {}

impl AgentPose for TestWorld {
    fn position(&self, _agent: u32) -> Option<Vec3> {
        Some(self.position)
    }

    fn yaw(&self, _agent: u32) -> Option<f32> {
        Some(self.yaw)
    }

    fn capability(&self, _agent: u32) -> AgentCapability {
        self.capability
    }
}

impl AgentPoseMut for TestWorld {
    fn set_yaw(&mut self, _agent: u32, yaw: f32) {
        self.yaw = yaw;
        self.yaw_writes += 1;
    }
}

impl EntityQuery for TestWorld {
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
        let mut out: Vec<WorldEntity> = self
            .entities
            .iter()
            .filter(|e| e.position.distance(origin) <= radius)
            .cloned()
            .collect();
        out.sort_by(|a, b| {
            a.position
                .distance(origin)
                .total_cmp(&b.position.distance(origin))
                .then(a.id.cmp(&b.id))
        });
        out
    }
}

impl Pathfinding for TestWorld {
    fn reachable(&self, _agent: u32, goal: Vec3) -> bool {
        self.navigator().find_path(self.position, goal).is_some()
    }

    fn navigate(&mut self, _agent: u32, goal: Vec3) -> bool {
        let from = self.position;
        match &self.grid {
            Some(grid) => self.nav.set_goal(grid, from, goal),
            None => self.nav.set_goal(&OpenField, from, goal),
        }
    }

    fn clear_path(&mut self, _agent: u32) {
        self.nav.clear();
    }

    fn has_path(&self, _agent: u32) -> bool {
        self.nav.has_path()
    }

    fn path_valid(&self, _agent: u32) -> bool {
        self.nav.is_valid()
    }

    fn remaining_distance(&self, _agent: u32) -> Option<f32> {
        self.nav.remaining_distance(self.position)
    }
}

pub fn ctx(tick: u64, dt: f32) -> TickContext {
    TickContext::new(tick, dt)
}
