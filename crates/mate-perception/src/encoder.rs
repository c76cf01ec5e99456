use core::fmt;

use mate_core::{AgentId, AgentPose, EntityId, EntityQuery, TickContext, Vec3};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::snapshot::{PerceivedEntity, PerceptionSnapshot, ReferenceSummary};
use crate::{Direction, PerceptionConfig};

const TIME_EPSILON: f32 = 1e-4;

/// Which change-detection rule fired. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EmitReason {
    FirstEmission,
    AgentMoved,
    ReferenceMoved,
    /// The reference entity appeared or disappeared.
    ReferenceVisibility,
    NeighborsChanged,
    Fallback,
}

impl EmitReason {
    pub fn as_str(self) -> &'static str {
        match self {
            EmitReason::FirstEmission => "first_emission",
            EmitReason::AgentMoved => "agent_moved",
            EmitReason::ReferenceMoved => "reference_moved",
            EmitReason::ReferenceVisibility => "reference_visibility",
            EmitReason::NeighborsChanged => "neighbors_changed",
            EmitReason::Fallback => "fallback",
        }
    }
}

impl fmt::Display for EmitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State captured at the last emission.
#[derive(Debug, Clone, PartialEq)]
struct Emitted {
    agent_position: Vec3,
    reference_position: Option<Vec3>,
    nearby: Vec<EntityId>,
}

/// Read-only observer of one agent.
#[derive(Debug, Clone)]
pub struct PerceptionEncoder {
    config: PerceptionConfig,
    since_sample: f32,
    since_emit: f32,
    last: Option<Emitted>,
}

impl PerceptionEncoder {
    pub fn new(config: PerceptionConfig) -> Self {
        Self {
            config,
            since_sample: 0.0,
            since_emit: 0.0,
            last: None,
        }
    }

    pub fn config(&self) -> &PerceptionConfig {
        &self.config
    }

    /// Seconds since the last emission.
    pub fn since_emit(&self) -> f32 {
        self.since_emit
    }

    /// Forget all comparison state; the next sample emits unconditionally.
    pub fn reset(&mut self) {
        self.since_sample = 0.0;
        self.since_emit = 0.0;
        self.last = None;
    }

    /// Advance time, sample when due, and return a snapshot when the change policy fires.
    pub fn tick<W>(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &W,
    ) -> Option<PerceptionSnapshot>
    where
        W: AgentPose + EntityQuery,
    {
        self.since_sample += ctx.dt();
        self.since_emit += ctx.dt();

        if self.last.is_some() && self.since_sample + TIME_EPSILON < self.config.sample_interval {
            return None;
        }
        self.since_sample = 0.0;

        let mut snapshot = self.observe(ctx.tick, agent, world)?;
        let reason = self.evaluate_snapshot(&snapshot)?;
        snapshot.reason = Some(reason);

        self.last = Some(Emitted {
            agent_position: snapshot.agent_position,
            reference_position: snapshot.reference.as_ref().map(|r| r.position),
            nearby: snapshot.nearby_ids(),
        });
        self.since_emit = 0.0;

        tracing::debug!(
            agent = agent.stable_id(),
            tick = ctx.tick,
            reason = %reason,
            nearby = snapshot.nearby.len(),
            "perception emitted"
        );
        Some(snapshot)
    }

    /// Build a snapshot of the current state without touching comparison state.
    ///
    /// `None` when the agent has no pose.
    pub fn observe<W>(&self, tick: u64, agent: W::Agent, world: &W) -> Option<PerceptionSnapshot>
    where
        W: AgentPose + EntityQuery,
    {
        let origin = world.position(agent)?;
        let yaw = world.yaw(agent).unwrap_or(0.0);

        let reference_entity = world.find_by_name(&self.config.reference_name);
        let reference = reference_entity.as_ref().map(|entity| ReferenceSummary {
            position: entity.position,
            distance: origin.distance(entity.position),
            direction: Direction::classify(origin, yaw, entity.position),
        });
        let reference_id = reference_entity.map(|entity| entity.id);

        let perceived: Vec<PerceivedEntity> = world
            .nearby(origin, self.config.scan_radius)
            .iter()
            .filter(|entity| Some(entity.id) != reference_id)
            .map(|entity| PerceivedEntity::from_entity(entity, origin, yaw))
            .collect();

        let threat = perceived.iter().find(|e| e.tags.threat).cloned();
        let nearby = perceived
            .into_iter()
            .take(self.config.max_entities)
            .collect();

        Some(PerceptionSnapshot {
            tick,
            agent_position: origin,
            agent_yaw: yaw,
            reference_name: self.config.reference_name.clone(),
            reference,
            nearby,
            threat,
            reason: None,
        })
    }

    /// Which rule would fire for the current state, without emitting.
    pub fn evaluate<W>(&self, agent: W::Agent, world: &W) -> Option<EmitReason>
    where
        W: AgentPose + EntityQuery,
    {
        let snapshot = self.observe(0, agent, world)?;
        self.evaluate_snapshot(&snapshot)
    }

    fn evaluate_snapshot(&self, snapshot: &PerceptionSnapshot) -> Option<EmitReason> {
        let Some(last) = &self.last else {
            return Some(EmitReason::FirstEmission);
        };

        if snapshot.agent_position.distance(last.agent_position) > self.config.move_threshold {
            return Some(EmitReason::AgentMoved);
        }

        let reference_position = snapshot.reference.as_ref().map(|r| r.position);
        match (reference_position, last.reference_position) {
            (Some(now), Some(before)) => {
                if now.distance(before) > self.config.reference_move_threshold {
                    return Some(EmitReason::ReferenceMoved);
                }
            }
            (None, None) => {}
            _ => return Some(EmitReason::ReferenceVisibility),
        }

        let unchanged = snapshot.nearby.len() == last.nearby.len()
            && snapshot
                .nearby
                .iter()
                .zip(&last.nearby)
                .all(|(entity, id)| entity.id == *id);
        if !unchanged {
            return Some(EmitReason::NeighborsChanged);
        }

        if self.since_emit + TIME_EPSILON >= self.config.fallback_interval {
            return Some(EmitReason::Fallback);
        }

        None
    }
}

impl Default for PerceptionEncoder {
    fn default() -> Self {
        Self::new(PerceptionConfig::default())
    }
}
