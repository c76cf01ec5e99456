//! Scenario files: the world to build and the planner messages to replay against it.
//!
//! ```yaml
//! name: courtyard
//! agent: { position: [0, 0, 0], yaw_degrees: 0 }
//! reference: { name: Player, position: [0, 0, 12], waypoints: [[6, 0, 12]] }
//! entities:
//!   - name: Wall
//!     position: [4, 0, 6]
//!     height: 1.5
//!     affordances: { provides_cover: true }
//! blocked: [[3, 3]]
//! timeline:
//!   - at: 0.0
//!     kind: message
//!     message: { type: behavior, behavior: follow_player, context: { followDistance: 4 } }
//! ```

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use mate_core::{AffordanceDescriptor, AgentCapability, EntityId, Vec3, WorldEntity};
use serde::{Deserialize, Serialize};

use crate::config::GridConfig;
use crate::world::{ReferenceMover, SimAgent, SimWorld};
use crate::NavConfig;

/// Agent id used for the scenario's single companion.
pub const AGENT: u32 = 0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScenarioError {
    #[error("duplicate entity name `{0}`")]
    DuplicateEntity(String),
    #[error("entity name must not be empty")]
    UnnamedEntity,
    #[error("timeline entry at {at}s is out of order (after {previous}s)")]
    TimelineOrder { at: f32, previous: f32 },
    #[error("timeline entry has negative time {0}")]
    NegativeTime(f32),
    #[error("blocked cells need a grid")]
    BlockedWithoutGrid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub agent: AgentSpec,
    #[serde(default)]
    pub reference: Option<ReferenceSpec>,
    #[serde(default)]
    pub entities: Vec<EntitySpec>,
    /// Overrides the configured grid.
    #[serde(default)]
    pub grid: Option<GridConfig>,
    /// Grid cells `[x, z]` that start blocked.
    #[serde(default)]
    pub blocked: Vec<[i32; 2]>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSpec {
    pub position: [f32; 3],
    pub yaw_degrees: f32,
    pub capability: AgentCapability,
    /// Overrides `nav.agent_speed`.
    pub speed: Option<f32>,
}

impl Default for AgentSpec {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            yaw_degrees: 0.0,
            capability: AgentCapability::default(),
            speed: None,
        }
    }
}

/// The tracked reference entity, optionally walking a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSpec {
    #[serde(default = "default_reference_name")]
    pub name: String,
    pub position: [f32; 3],
    #[serde(default)]
    pub waypoints: Vec<[f32; 3]>,
    /// Overrides `nav.reference_speed`.
    #[serde(default)]
    pub speed: Option<f32>,
    #[serde(default, rename = "loop")]
    pub looping: bool,
}

fn default_reference_name() -> String {
    "Player".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpec {
    pub name: String,
    pub position: [f32; 3],
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default)]
    pub affordances: Option<AffordanceDescriptor>,
}

fn default_height() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Seconds from the start of the run.
    pub at: f32,
    #[serde(flatten)]
    pub action: TimelineAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineAction {
    /// Inbound planner message: raw text, or a structured envelope sent as JSON.
    Message { message: serde_json::Value },
    Block { cell: [i32; 2] },
    Unblock { cell: [i32; 2] },
    /// Teleport a named entity.
    Move { entity: String, position: [f32; 3] },
    Cancel,
}

impl TimelineAction {
    /// Wire text of a message action.
    pub fn message_text(&self) -> Option<String> {
        match self {
            TimelineAction::Message {
                message: serde_json::Value::String(raw),
            } => Some(raw.clone()),
            TimelineAction::Message { message } => Some(message.to_string()),
            _ => None,
        }
    }
}

fn vec3([x, y, z]: [f32; 3]) -> Vec3 {
    Vec3::new(x, y, z)
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to load scenario from {}", path.display()))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let scenario: Self = serde_yaml::from_str(yaml).context("Failed to parse scenario")?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        let mut names = HashSet::new();
        let reference = self.reference.as_ref().map(|r| r.name.as_str());
        for name in reference.into_iter().chain(self.entities.iter().map(|e| e.name.as_str())) {
            if name.trim().is_empty() {
                return Err(ScenarioError::UnnamedEntity);
            }
            if !names.insert(name.to_ascii_lowercase()) {
                return Err(ScenarioError::DuplicateEntity(name.to_string()));
            }
        }

        let mut previous = 0.0_f32;
        for entry in &self.timeline {
            if entry.at < 0.0 {
                return Err(ScenarioError::NegativeTime(entry.at));
            }
            if entry.at < previous {
                return Err(ScenarioError::TimelineOrder {
                    at: entry.at,
                    previous,
                });
            }
            previous = entry.at;
        }

        Ok(())
    }

    /// Build the world. Entity ids follow declaration order starting at 1, the reference first.
    pub fn build_world(&self, nav: &NavConfig) -> Result<SimWorld, ScenarioError> {
        let grid = self.grid.as_ref().or(nav.grid.as_ref());
        let mut world = match grid {
            Some(grid) => SimWorld::with_grid(grid.build()),
            None if !self.blocked.is_empty() => return Err(ScenarioError::BlockedWithoutGrid),
            None => SimWorld::open(),
        };
        for [x, z] in &self.blocked {
            world.set_blocked(*x, *z, true);
        }

        let speed = self.agent.speed.unwrap_or(nav.agent_speed);
        world.spawn_agent(
            AGENT,
            SimAgent::new(
                vec3(self.agent.position),
                self.agent.yaw_degrees.to_radians(),
                speed,
            )
            .with_capability(self.agent.capability),
        );

        let mut next_id = 1;
        if let Some(reference) = &self.reference {
            let id = next_id;
            next_id += 1;
            world.insert_entity(WorldEntity::new(id, &reference.name, vec3(reference.position)));
            if !reference.waypoints.is_empty() {
                world.add_mover(ReferenceMover::new(
                    EntityId(id),
                    reference.waypoints.iter().copied().map(vec3).collect(),
                    reference.speed.unwrap_or(nav.reference_speed),
                    reference.looping,
                ));
            }
        }

        for spec in &self.entities {
            let mut entity =
                WorldEntity::new(next_id, &spec.name, vec3(spec.position)).with_height(spec.height);
            if let Some(descriptor) = &spec.affordances {
                let mut descriptor = descriptor.clone();
                if descriptor.name.is_empty() {
                    descriptor.name = spec.name.clone();
                }
                entity = entity.with_descriptor(descriptor);
            }
            world.insert_entity(entity);
            next_id += 1;
        }

        tracing::debug!(
            scenario = %self.name,
            entities = world.entities().len(),
            grid = grid.is_some(),
            "world built"
        );
        Ok(world)
    }
}
