use core::fmt::Write as _;

use mate_core::{EntityId, Vec3, WorldEntity};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{Direction, EmitReason};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EntityTags {
    pub cover: bool,
    pub threat: bool,
    pub interactive: bool,
}

impl EntityTags {
    pub fn of(entity: &WorldEntity) -> Self {
        Self {
            cover: entity.is_cover(),
            threat: entity.is_threat(),
            interactive: entity.is_interactive(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PerceivedEntity {
    pub id: EntityId,
    pub name: String,
    pub position: Vec3,
    pub distance: f32,
    pub direction: Direction,
    pub tags: EntityTags,
}

impl PerceivedEntity {
    pub fn from_entity(entity: &WorldEntity, origin: Vec3, yaw: f32) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
            position: entity.position,
            distance: origin.distance(entity.position),
            direction: Direction::classify(origin, yaw, entity.position),
            tags: EntityTags::of(entity),
        }
    }

    fn write_summary(&self, out: &mut String) {
        let _ = write!(out, "{} {:.0}m {}", self.name, self.distance, self.direction);
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ReferenceSummary {
    pub position: Vec3,
    pub distance: f32,
    pub direction: Direction,
}

/// One rendered view of the agent's surroundings. Immutable once emitted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PerceptionSnapshot {
    pub tick: u64,
    pub agent_position: Vec3,
    pub agent_yaw: f32,
    pub reference_name: String,
    pub reference: Option<ReferenceSummary>,
    /// Closest first, capped.
    pub nearby: Vec<PerceivedEntity>,
    /// Closest threat within scan radius, capped list or not.
    pub threat: Option<PerceivedEntity>,
    /// Set when the snapshot was emitted by the encoder.
    pub reason: Option<EmitReason>,
}

impl PerceptionSnapshot {
    pub fn nearby_ids(&self) -> Vec<EntityId> {
        self.nearby.iter().map(|e| e.id).collect()
    }

    /// Three lines: reference, nearby objects, threats.
    pub fn render(&self) -> String {
        let mut out = String::new();

        match &self.reference {
            Some(reference) => {
                let _ = write!(
                    out,
                    "{}: {:.0}m {}.",
                    self.reference_name, reference.distance, reference.direction
                );
            }
            None => {
                let _ = write!(out, "{}: Not detected.", self.reference_name);
            }
        }

        out.push_str("\nNearby: ");
        if self.nearby.is_empty() {
            out.push_str("No objects detected.");
        } else {
            for (i, entity) in self.nearby.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                entity.write_summary(&mut out);
                if entity.tags.cover {
                    out.push_str(" (cover)");
                }
                if entity.tags.threat {
                    out.push_str(" (THREAT)");
                }
                if entity.tags.interactive {
                    out.push_str(" (interactive)");
                }
            }
            out.push('.');
        }

        match &self.threat {
            Some(threat) => {
                out.push_str("\nALERT: ");
                threat.write_summary(&mut out);
                out.push('!');
            }
            None => out.push_str("\nThreats: None visible."),
        }

        out
    }
}

/// Outbound transport envelope for one emission.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PerceptionMessage {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: &'static str,
    pub perception: String,
    pub tick: u64,
}

impl PerceptionMessage {
    pub fn from_snapshot(snapshot: &PerceptionSnapshot) -> Self {
        Self {
            kind: "text_perception",
            perception: snapshot.render(),
            tick: snapshot.tick,
        }
    }
}
