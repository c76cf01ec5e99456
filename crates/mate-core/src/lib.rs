//! Engine-agnostic kernel primitives for a planner-driven companion agent.
//!
//! Everything above this crate (navigation, perception, plan execution, behaviors) is expressed
//! as cooperative [`Task`]s driven by a single [`TickContext`] per simulation tick, reading and
//! mutating the world only through the traits in [`world`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod entity;
pub mod event;
pub mod math;
pub mod param;
pub mod task;
pub mod tick;
pub mod world;

pub use agent::{AgentCapability, AgentId};
pub use entity::{AffordanceDescriptor, EntityId, WorldEntity};
pub use event::{AgentEvent, ChannelSink, EventLog, EventSink, FanoutSink, NullSink};
pub use math::Vec3;
pub use param::ParamError;
pub use task::{CancelToken, Failure, Task, TaskKey, TaskOutcome, TaskSlot, TaskStatus};
pub use tick::{TickContext, Timer};
pub use world::{AgentPose, AgentPoseMut, EntityQuery, WorldMut, WorldView};
