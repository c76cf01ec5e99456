//! Reference world and scenario runner.
//!
//! [`SimWorld`] implements every world trait the core consumes (pose, entity registry,
//! pathfinding) on top of `mate-nav`'s grid and path follower. A [`Scenario`] describes the
//! world and a timeline of inbound planner messages; [`Simulation`] drives encoder, scheduler
//! and world from one tick loop.

#![forbid(unsafe_code)]

pub mod config;
pub mod scenario;
pub mod simulation;
pub mod world;

pub use config::{ConfigError, GridConfig, MateConfig, NavConfig};
pub use scenario::{
    AgentSpec, EntitySpec, ReferenceSpec, Scenario, ScenarioError, TimelineAction, TimelineEntry,
};
pub use simulation::{RunSummary, Simulation, TickReport};
pub use world::{ReferenceMover, SimAgent, SimWorld};
