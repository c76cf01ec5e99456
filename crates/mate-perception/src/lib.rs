//! Spatial perception encoder.
//!
//! Samples the agent's surroundings on a fixed cadence and emits a three-line text snapshot only
//! when something meaningful changed (or a fallback interval passed), so a planner can consume
//! the world cheaply.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod direction;
pub mod encoder;
pub mod snapshot;

pub use config::PerceptionConfig;
pub use direction::Direction;
pub use encoder::{EmitReason, PerceptionEncoder};
pub use snapshot::{EntityTags, PerceivedEntity, PerceptionMessage, PerceptionSnapshot, ReferenceSummary};
