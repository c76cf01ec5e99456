//! Umbrella crate that re-exports the `mate-*` building blocks.
//!
//! The pieces, bottom-up:
//! - [`core`]: tick context, cooperative tasks, world traits, events.
//! - [`nav`]: the pathfinding service surface plus a grid backend.
//! - [`affordance`]: can this agent climb/jump/open that object?
//! - [`perception`]: world state to the three-line text the planner reads.
//! - [`exec`]: multi-step plans with a timeout.
//! - [`behavior`]: single high-level commands and the preemptive scheduler.
//! - [`sim`]: a reference world and scenario runner.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use mate_core as core;

#[cfg(feature = "nav")]
#[cfg_attr(docsrs, doc(cfg(feature = "nav")))]
pub use mate_nav as nav;

#[cfg(feature = "affordance")]
#[cfg_attr(docsrs, doc(cfg(feature = "affordance")))]
pub use mate_affordance as affordance;

#[cfg(feature = "perception")]
#[cfg_attr(docsrs, doc(cfg(feature = "perception")))]
pub use mate_perception as perception;

#[cfg(feature = "exec")]
#[cfg_attr(docsrs, doc(cfg(feature = "exec")))]
pub use mate_exec as exec;

#[cfg(feature = "behavior")]
#[cfg_attr(docsrs, doc(cfg(feature = "behavior")))]
pub use mate_behavior as behavior;

#[cfg(feature = "sim")]
#[cfg_attr(docsrs, doc(cfg(feature = "sim")))]
pub use mate_sim as sim;
