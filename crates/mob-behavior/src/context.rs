//! Per-tick view lent to every policy lifecycle call, plus the command
//! queue that makes re-entrant scheduler mutation well-defined.

use std::fmt;

use mob_core::{AgentHandle, AgentRng, PolicyId, Vec3};
use mob_world::WorldQuery;

use crate::BehaviorPolicy;

// ── SchedulerCommand ──────────────────────────────────────────────────────────

/// A structural change to the owning scheduler, requested from inside a
/// guard or lifecycle hook.
///
/// Policies cannot call `add_policy`/`remove_policy` on their scheduler
/// directly — the scheduler is mid-iteration over its own registry when a
/// hook runs.  Instead, requests queue up on the [`PolicyContext`] and the
/// scheduler applies them at the end of the current `update()`:
///
/// - `Add` lands in the next tick's snapshot.
/// - `Remove` of a policy in the current snapshot takes effect immediately
///   for that policy (later phases of this tick skip it); the registry entry
///   itself is dropped at the end of the tick.
pub enum SchedulerCommand {
    /// Register a new policy.
    Add(Box<dyn BehaviorPolicy>),
    /// Deregister a policy by ID.  Stops it first if it is active.
    Remove(PolicyId),
}

impl fmt::Debug for SchedulerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerCommand::Add(p) => write!(f, "Add({})", p.name()),
            SchedulerCommand::Remove(id) => write!(f, "Remove({id})"),
        }
    }
}

// ── PolicyContext ─────────────────────────────────────────────────────────────

/// Everything a policy may touch during one lifecycle call.
///
/// Built by the scheduler for each call and handed in by reference: the
/// agent being driven, the world capability, the agent's deterministic RNG,
/// and the scheduler command sink.  Guards receive `&PolicyContext` (reads
/// only); lifecycle hooks receive `&mut PolicyContext`.
pub struct PolicyContext<'a> {
    /// The agent this policy drives.
    pub agent: AgentHandle,

    /// World capability: proximity, terrain, movement application.
    pub world: &'a mut dyn WorldQuery,

    /// Per-agent deterministic RNG.
    pub rng: &'a mut AgentRng,

    commands: &'a mut Vec<SchedulerCommand>,
}

impl<'a> PolicyContext<'a> {
    /// Assemble a context for one lifecycle call.  Called by the scheduler.
    pub fn new(
        agent: AgentHandle,
        world: &'a mut dyn WorldQuery,
        rng: &'a mut AgentRng,
        commands: &'a mut Vec<SchedulerCommand>,
    ) -> Self {
        Self { agent, world, rng, commands }
    }

    // ── Read helpers ──────────────────────────────────────────────────────

    /// Current position of the driven agent.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.world.position(self.agent)
    }

    /// All other agents within a cubic box of half-extent `radius` around
    /// this agent, in deterministic (handle) order.  The driven agent itself
    /// is filtered out.
    pub fn neighbors(&self, radius: f64) -> Vec<AgentHandle> {
        let pos = self.position();
        self.world
            .query_nearby(pos, radius, radius, radius)
            .into_iter()
            .filter(|&h| h != self.agent)
            .collect()
    }

    /// The nearest other agent within `radius` (exact Euclidean distance),
    /// together with that distance.  Ties resolve to the lower handle.
    pub fn nearest_neighbor(&self, radius: f64) -> Option<(AgentHandle, f64)> {
        let pos = self.position();
        let mut best: Option<(AgentHandle, f64)> = None;
        for h in self.neighbors(radius) {
            let d = pos.distance(self.world.position(h));
            if d > radius {
                continue;
            }
            // Strict comparison keeps the first (lowest) handle on ties.
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((h, d));
            }
        }
        best
    }

    // ── Scheduler commands ────────────────────────────────────────────────

    /// Queue registration of a new policy with the owning scheduler.
    /// Takes effect for the next tick's arbitration.
    pub fn add_policy(&mut self, policy: Box<dyn BehaviorPolicy>) {
        self.commands.push(SchedulerCommand::Add(policy));
    }

    /// Queue deregistration of a policy.  If `id` is part of the current
    /// tick's snapshot it is skipped by the remaining phases of this tick.
    pub fn remove_policy(&mut self, id: PolicyId) {
        self.commands.push(SchedulerCommand::Remove(id));
    }
}
