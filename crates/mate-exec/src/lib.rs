//! Plan execution.
//!
//! An [`ExecutionPlan`] is an ordered list of typed [`Step`]s parsed from the planner's wire
//! format. [`CommandExecutor`] runs one plan at a time, building a cooperative
//! [`mate_core::Task`] per step from [`primitives`], and ends every plan with exactly one
//! [`ExecutionOutcome`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod executor;
pub mod params;
pub mod plan;
pub mod primitives;
pub mod state;
pub mod step;

pub use config::ExecutorConfig;
pub use executor::CommandExecutor;
pub use plan::{ExecutionPlan, PlanError, RawPlan};
pub use primitives::MotorWorld;
pub use state::{ExecutionOutcome, ExecutionState};
pub use step::{Goal, RawStep, Step};
