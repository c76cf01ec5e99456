//! Affordance validation: may this agent perform this action on this object?
//!
//! Declared [`mate_core::AffordanceDescriptor`] flags win; objects without a descriptor fall back
//! to bounding-height inference, and anything that geometry can't judge is allowed here and left
//! to fail at execution time.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod validator;
pub mod verdict;

pub use action::AffordanceAction;
pub use validator::AffordanceValidator;
pub use verdict::{Rejection, Verdict};
