//! Behavior layer: planner commands in, cooperative motor work out.
//!
//! Inbound text is parsed into a [`BehaviorCommand`] (or an [`mate_exec::ExecutionPlan`]); the
//! [`BehaviorScheduler`] turns it into one of the four [`Behavior`] handlers, preempting whatever
//! was running, and reports how it ended.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod behaviors;
pub mod command;
pub mod config;
pub mod context;
pub mod error;
pub mod message;
pub mod scheduler;

pub use behaviors::{Behavior, FollowBehavior, HoldBehavior, MoveToBehavior, TakeCoverBehavior};
pub use command::{BehaviorCommand, BehaviorVerb};
pub use config::BehaviorConfig;
pub use context::{Context, ContextValue};
pub use error::CommandError;
pub use message::{parse_message, InboundMessage};
pub use scheduler::{
    BehaviorReport, BehaviorScheduler, DispatchHandle, SchedulerState, SchedulerStatus,
};
