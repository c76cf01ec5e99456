use crate::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier of a world object in the entity registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityId(pub u64);

/// Declared capabilities of a world object.
///
/// Attached to objects by level designers; read-only input to perception tagging and
/// affordance validation. Heights are only meaningful when the matching flag is set.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AffordanceDescriptor {
    pub name: String,
    pub description: String,
    /// Free-form type tag ("crate", "door", "turret", ...).
    pub kind: String,
    pub can_interact: bool,
    pub is_threat: bool,
    pub provides_cover: bool,
    pub can_climb: bool,
    pub climb_height: f32,
    pub can_jump_on: bool,
    pub jump_height: f32,
    pub can_pickup: bool,
    pub can_open: bool,
    pub requires_key: bool,
}

impl AffordanceDescriptor {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn cover(mut self) -> Self {
        self.provides_cover = true;
        self
    }

    pub fn threat(mut self) -> Self {
        self.is_threat = true;
        self
    }

    pub fn interactive(mut self) -> Self {
        self.can_interact = true;
        self
    }

    pub fn climbable(mut self, height: f32) -> Self {
        self.can_climb = true;
        self.climb_height = height;
        self
    }

    pub fn jumpable(mut self, height: f32) -> Self {
        self.can_jump_on = true;
        self.jump_height = height;
        self
    }

    pub fn pickup(mut self) -> Self {
        self.can_pickup = true;
        self
    }

    pub fn openable(mut self, requires_key: bool) -> Self {
        self.can_open = true;
        self.requires_key = requires_key;
        self
    }
}

/// A world object as returned by the entity registry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldEntity {
    pub id: EntityId,
    pub name: String,
    pub position: Vec3,
    /// Height of the object's bounding box, used when no descriptor is declared.
    #[cfg_attr(feature = "serde", serde(default = "default_bounds_height"))]
    pub bounds_height: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub descriptor: Option<AffordanceDescriptor>,
}

#[cfg(feature = "serde")]
fn default_bounds_height() -> f32 {
    1.0
}

impl WorldEntity {
    pub fn new(id: u64, name: impl Into<String>, position: Vec3) -> Self {
        Self {
            id: EntityId(id),
            name: name.into(),
            position,
            bounds_height: 1.0,
            descriptor: None,
        }
    }

    pub fn with_height(mut self, bounds_height: f32) -> Self {
        self.bounds_height = bounds_height;
        self
    }

    pub fn with_descriptor(mut self, descriptor: AffordanceDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    pub fn is_cover(&self) -> bool {
        self.descriptor.as_ref().is_some_and(|d| d.provides_cover)
    }

    pub fn is_threat(&self) -> bool {
        self.descriptor.as_ref().is_some_and(|d| d.is_threat)
    }

    pub fn is_interactive(&self) -> bool {
        self.descriptor.as_ref().is_some_and(|d| d.can_interact)
    }
}
