//! Pathfinding primitives: the service surface the core consumes, plus reference backends.
//!
//! The behavior and execution layers only ever talk to [`Pathfinding`]. [`NavGrid`],
//! [`OpenField`] and [`NavAgent`] exist so the core can be exercised without an engine.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod follower;
pub mod grid;
pub mod navigator;
pub mod service;

pub use follower::NavAgent;
pub use grid::NavGrid;
pub use navigator::{NavPath, Navigator, OpenField};
pub use service::Pathfinding;
