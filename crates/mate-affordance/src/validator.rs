use mate_core::{AffordanceDescriptor, AgentCapability, WorldEntity};

use crate::{AffordanceAction, Rejection, Verdict};

/// Stateless capability check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffordanceValidator {
    /// Minimum bounding height for an undeclared object to count as cover.
    pub min_cover_height: f32,
}

impl Default for AffordanceValidator {
    fn default() -> Self {
        Self {
            min_cover_height: 1.0,
        }
    }
}

impl AffordanceValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_perform(
        &self,
        object: &WorldEntity,
        action: &AffordanceAction,
        capability: AgentCapability,
    ) -> Verdict {
        let verdict = match &object.descriptor {
            Some(descriptor) => check_declared(descriptor, action, capability),
            None => self.check_geometry(object.bounds_height, action, capability),
        };
        if let Some(reason) = &verdict.reason {
            tracing::debug!(
                object = %object.name,
                action = %action,
                declared = object.descriptor.is_some(),
                reason = %reason,
                "affordance rejected"
            );
        }
        verdict
    }

    fn check_geometry(
        &self,
        height: f32,
        action: &AffordanceAction,
        capability: AgentCapability,
    ) -> Verdict {
        let max = capability.max_step_height;
        match action {
            AffordanceAction::Climb if height > max => Verdict::reject(Rejection::TooTall { max }),
            AffordanceAction::Jump if height > max => Verdict::reject(Rejection::TooHigh { max }),
            AffordanceAction::TakeCover if height < self.min_cover_height => {
                Verdict::reject(Rejection::NoCover)
            }
            _ => Verdict::allow(),
        }
    }
}

fn check_declared(
    descriptor: &AffordanceDescriptor,
    action: &AffordanceAction,
    capability: AgentCapability,
) -> Verdict {
    let max = capability.max_step_height;
    let rejection = match action {
        AffordanceAction::Climb if !descriptor.can_climb => Some(Rejection::NotClimbable),
        AffordanceAction::Climb if descriptor.climb_height > max => {
            Some(Rejection::TooTall { max })
        }
        AffordanceAction::Jump if !descriptor.can_jump_on => Some(Rejection::NotJumpable),
        AffordanceAction::Jump if descriptor.jump_height > max => Some(Rejection::TooHigh { max }),
        AffordanceAction::TakeCover if !descriptor.provides_cover => Some(Rejection::NoCover),
        AffordanceAction::Interact if !descriptor.can_interact => {
            Some(Rejection::NotPossible("interact".to_string()))
        }
        AffordanceAction::Pickup if !descriptor.can_pickup => Some(Rejection::CannotPickup),
        AffordanceAction::Open if !descriptor.can_open => Some(Rejection::CannotOpen),
        AffordanceAction::Open if descriptor.requires_key && !capability.has_key => {
            Some(Rejection::NeedsKey)
        }
        AffordanceAction::Other(verb) => Some(Rejection::NotPossible(verb.clone())),
        _ => None,
    };
    rejection.map_or_else(Verdict::allow, Verdict::reject)
}
