//! The `BehaviorScheduler` and its four-phase tick.

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use mob_behavior::{BehaviorPolicy, PolicyContext, PolicyError, SchedulerCommand};
use mob_core::{AgentHandle, AgentRng, PolicyId};
use mob_world::WorldQuery;

use crate::{FaultPolicy, SchedulerConfig, SchedulerError, SchedulerResult};

// ── Slot ──────────────────────────────────────────────────────────────────────

/// One registered policy together with its scheduler-side bookkeeping.
struct Slot {
    id:           PolicyId,
    /// Cached from `policy.priority()` at registration; the registry order
    /// is derived from it and never recomputed unless the registry changes.
    priority:     f64,
    /// ACTIVE/INACTIVE per the policy state machine.  Owned by the
    /// scheduler, not the policy: `stop()` is only ever invoked while set.
    active:       bool,
    /// Consecutive faulting ticks; reset by any fault-free evaluation.
    fault_streak: u32,
    policy:       Box<dyn BehaviorPolicy>,
}

/// Which lifecycle call a fault came from, for containment and logging.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Hook {
    Guard,
    Start,
    Update,
    Stop,
}

// ── BehaviorScheduler ─────────────────────────────────────────────────────────

/// Per-agent behavior arbitration.
///
/// Owns an ordered registry of [`BehaviorPolicy`] trait objects (priority
/// descending, ties in insertion order) and drives them through the
/// per-tick arbitration in [`update`](Self::update):
///
/// 1. **Concurrent eviction** — members whose guard turned false are
///    stopped and removed from the concurrent set.
/// 2. **Primary arbitration** — the first guard-true policy in registry
///    order becomes primary; on a switch the outgoing primary's `stop()`
///    completes strictly before the incoming one's `start()`.
/// 3. **Primary update**.
/// 4. **Concurrent admission** — remaining guard-true policies are admitted
///    in priority order up to the configured capacity, then every member is
///    updated.
///
/// The scheduler is the fault containment boundary: an `Err` from any guard
/// or lifecycle hook is logged, the offender is force-stopped and evicted
/// for the tick, and [`FaultPolicy`] decides whether it is retried next tick
/// or eventually deregistered.  No policy error ever propagates to the
/// caller of `update`.
pub struct BehaviorScheduler {
    agent:      AgentHandle,
    config:     SchedulerConfig,
    /// Registry, kept sorted by priority descending (stable on insertion).
    slots:      Vec<Slot>,
    primary:    Option<PolicyId>,
    /// Concurrent set in admission order.  Invariant: `len() <=
    /// config.concurrent_capacity`, and every member's `active` flag is set.
    concurrent: Vec<PolicyId>,
    /// Deterministic per-agent RNG, lent to policies through the context.
    rng:        AgentRng,
    /// Structural changes queued by policies mid-tick; applied at the end
    /// of `update`.
    pending:    Vec<SchedulerCommand>,
    next_id:    u32,
}

impl BehaviorScheduler {
    /// Create an empty scheduler for `agent`.
    ///
    /// `global_seed` is mixed with the agent handle to derive this agent's
    /// RNG, so identical seeds reproduce identical runs.
    pub fn new(
        agent: AgentHandle,
        config: SchedulerConfig,
        global_seed: u64,
    ) -> SchedulerResult<Self> {
        config.validate()?;
        Ok(Self {
            agent,
            config,
            slots: Vec::new(),
            primary: None,
            concurrent: Vec::new(),
            rng: AgentRng::new(global_seed, agent),
            pending: Vec::new(),
            next_id: 0,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn agent(&self) -> AgentHandle {
        self.agent
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// The current primary policy, if any.
    pub fn primary(&self) -> Option<PolicyId> {
        self.primary
    }

    /// The concurrent set, in admission order.
    pub fn concurrent(&self) -> &[PolicyId] {
        &self.concurrent
    }

    pub fn policy_count(&self) -> usize {
        self.slots.len()
    }

    /// Registered policy IDs in registry (arbitration) order.
    pub fn policy_ids(&self) -> Vec<PolicyId> {
        self.slots.iter().map(|s| s.id).collect()
    }

    /// `true` iff `id` is registered and currently ACTIVE (primary or
    /// concurrent).
    pub fn is_active(&self, id: PolicyId) -> bool {
        self.slot_index(id).is_some_and(|i| self.slots[i].active)
    }

    // ── Registry mutation ─────────────────────────────────────────────────

    /// Register a policy and return its ID.
    ///
    /// The registry stays sorted by priority descending; equal priorities
    /// keep insertion order.  No guard evaluation happens here — the policy
    /// first competes on the next `update`.  Rejects a non-finite or
    /// negative priority.
    pub fn add_policy(
        &mut self,
        policy: Box<dyn BehaviorPolicy>,
    ) -> SchedulerResult<PolicyId> {
        let priority = policy.priority();
        if !priority.is_finite() || priority < 0.0 {
            return Err(SchedulerError::Config(format!(
                "policy '{}' has invalid priority {priority}",
                policy.name()
            )));
        }

        let id = PolicyId(self.next_id);
        self.next_id += 1;

        // First position with a strictly lower priority; inserting there
        // keeps equal-priority policies in registration order.
        let at = self
            .slots
            .iter()
            .position(|s| s.priority < priority)
            .unwrap_or(self.slots.len());
        self.slots.insert(
            at,
            Slot { id, priority, active: false, fault_streak: 0, policy },
        );
        Ok(id)
    }

    /// Deregister `id`, stopping it first if it is active.
    ///
    /// Returns `false` if no such policy is registered.
    pub fn remove_policy(&mut self, id: PolicyId, world: &mut dyn WorldQuery) -> bool {
        let Some(_) = self.slot_index(id) else {
            return false;
        };
        let mut skip = FxHashSet::default();
        self.stop_policy(world, id, &mut skip);
        self.primary = self.primary.filter(|&p| p != id);
        self.concurrent.retain(|&c| c != id);
        if let Some(idx) = self.slot_index(id) {
            self.slots.remove(idx);
        }
        true
    }

    /// Stop every active policy, then empty the registry.
    ///
    /// Commands queued by the `stop` hooks are discarded: there is no
    /// registry left for them to apply to.
    pub fn clear_all(&mut self, world: &mut dyn WorldQuery) {
        let mut skip = FxHashSet::default();
        for id in self.policy_ids() {
            self.stop_policy(world, id, &mut skip);
        }
        self.slots.clear();
        self.concurrent.clear();
        self.primary = None;
        self.pending.clear();
    }

    // ── The tick ──────────────────────────────────────────────────────────

    /// Run one arbitration tick.  Called once per fixed simulation tick.
    ///
    /// Iterates over a snapshot of the registry taken here: structural
    /// changes requested by policies during the tick are deferred to the
    /// end, except that a removal of a snapshot member takes effect
    /// immediately for that member (later phases skip it).  The immediate
    /// carve-out deliberately covers *any* snapshot member, not just a
    /// policy removing itself: once a removal is queued, running the
    /// target's remaining lifecycle hooks this tick would hand a
    /// dead-policy's effects to the world, so the skip applies to every
    /// mid-tick removal target.
    pub fn update(&mut self, world: &mut dyn WorldQuery) {
        let snapshot = self.policy_ids();
        // Members removed mid-tick (self-removal, fault deregistration).
        let mut skip: FxHashSet<PolicyId> = FxHashSet::default();

        // ── Phase 1: concurrent eviction ──────────────────────────────────
        for id in self.concurrent.clone() {
            if skip.contains(&id) {
                continue;
            }
            match self.eval_guard(world, id) {
                None => {
                    self.concurrent.retain(|&c| c != id);
                }
                Some(Ok(true)) => {}
                Some(Ok(false)) => {
                    debug!(agent = %self.agent, policy = %id, "guard false, evicting from concurrent set");
                    self.stop_policy(world, id, &mut skip);
                    self.concurrent.retain(|&c| c != id);
                }
                Some(Err(e)) => self.contain_fault(world, id, Hook::Guard, &e, &mut skip),
            }
            self.collect_removals(&mut skip);
        }

        // ── Phase 2: primary arbitration ──────────────────────────────────
        let mut candidate = None;
        for &id in &snapshot {
            if skip.contains(&id) {
                continue;
            }
            match self.eval_guard(world, id) {
                None => continue,
                Some(Ok(true)) => candidate = Some(id),
                Some(Ok(false)) => {}
                Some(Err(e)) => self.contain_fault(world, id, Hook::Guard, &e, &mut skip),
            }
            self.collect_removals(&mut skip);
            if candidate.is_some() {
                break;
            }
        }

        if candidate != self.primary {
            let outgoing = self.primary.take();
            if let Some(old) = outgoing {
                // Stop strictly before the incoming primary's start.
                self.stop_policy(world, old, &mut skip);
            }
            if let Some(new) = candidate {
                // Promotion from the concurrent set: leave the set, then
                // start as primary.
                self.concurrent.retain(|&c| c != new);
                debug!(
                    agent = %self.agent,
                    old = ?outgoing,
                    new = %new,
                    "primary switched"
                );
                match self.invoke(world, new, Hook::Start) {
                    Some(Ok(())) => {
                        self.set_active(new, true);
                        self.primary = Some(new);
                    }
                    Some(Err(e)) => self.contain_fault(world, new, Hook::Start, &e, &mut skip),
                    None => {}
                }
                self.collect_removals(&mut skip);
            }
        }

        // ── Phase 3: primary update ───────────────────────────────────────
        if let Some(id) = self.primary {
            if !skip.contains(&id) {
                match self.invoke(world, id, Hook::Update) {
                    Some(Ok(())) => self.note_fault_free(id),
                    Some(Err(e)) => self.contain_fault(world, id, Hook::Update, &e, &mut skip),
                    None => self.primary = None,
                }
                self.collect_removals(&mut skip);
            }
        }

        // ── Phase 4: concurrent admission + member update ─────────────────
        for &id in &snapshot {
            if self.concurrent.len() >= self.config.concurrent_capacity {
                break;
            }
            if Some(id) == self.primary
                || skip.contains(&id)
                || self.concurrent.contains(&id)
            {
                continue;
            }
            match self.eval_guard(world, id) {
                None => continue,
                Some(Ok(false)) => {}
                Some(Ok(true)) => match self.invoke(world, id, Hook::Start) {
                    Some(Ok(())) => {
                        self.set_active(id, true);
                        self.concurrent.push(id);
                        debug!(agent = %self.agent, policy = %id, "admitted to concurrent set");
                    }
                    Some(Err(e)) => self.contain_fault(world, id, Hook::Start, &e, &mut skip),
                    None => {}
                },
                Some(Err(e)) => self.contain_fault(world, id, Hook::Guard, &e, &mut skip),
            }
            self.collect_removals(&mut skip);
        }

        for id in self.concurrent.clone() {
            if skip.contains(&id) {
                continue;
            }
            match self.invoke(world, id, Hook::Update) {
                Some(Ok(())) => self.note_fault_free(id),
                Some(Err(e)) => self.contain_fault(world, id, Hook::Update, &e, &mut skip),
                None => {
                    self.concurrent.retain(|&c| c != id);
                }
            }
            self.collect_removals(&mut skip);
        }

        // ── Phase 5: apply queued structural changes ──────────────────────
        self.apply_pending(world);
    }

    // ── Hook invocation ───────────────────────────────────────────────────

    fn slot_index(&self, id: PolicyId) -> Option<usize> {
        self.slots.iter().position(|s| s.id == id)
    }

    fn set_active(&mut self, id: PolicyId, active: bool) {
        if let Some(idx) = self.slot_index(id) {
            self.slots[idx].active = active;
        }
    }

    /// Reset the fault streak after a fault-free `update` or `stop`.
    /// Guards and `start` don't count: a policy that passes its guard but
    /// faults every update must still accumulate a streak.
    fn note_fault_free(&mut self, id: PolicyId) {
        if let Some(idx) = self.slot_index(id) {
            self.slots[idx].fault_streak = 0;
        }
    }

    /// Evaluate `id`'s guard.  `None` if it is no longer registered.
    fn eval_guard(
        &mut self,
        world: &mut dyn WorldQuery,
        id: PolicyId,
    ) -> Option<Result<bool, PolicyError>> {
        let idx = self.slot_index(id)?;
        let Self { agent, slots, rng, pending, .. } = self;
        let ctx = PolicyContext::new(*agent, world, rng, pending);
        Some(slots[idx].policy.guard(&ctx))
    }

    /// Run one lifecycle hook on `id`.  `None` if it is no longer
    /// registered.
    fn invoke(
        &mut self,
        world: &mut dyn WorldQuery,
        id: PolicyId,
        hook: Hook,
    ) -> Option<Result<(), PolicyError>> {
        let idx = self.slot_index(id)?;
        let Self { agent, slots, rng, pending, .. } = self;
        let policy = &mut slots[idx].policy;
        let mut ctx = PolicyContext::new(*agent, world, rng, pending);
        Some(match hook {
            Hook::Start => policy.start(&mut ctx),
            Hook::Update => policy.update(&mut ctx),
            Hook::Stop => policy.stop(&mut ctx),
            Hook::Guard => unreachable!("guards go through eval_guard"),
        })
    }

    /// Stop `id` if it is ACTIVE; a no-op otherwise (`stop` is never
    /// double-invoked).  A fault inside `stop` itself is contained.
    fn stop_policy(
        &mut self,
        world: &mut dyn WorldQuery,
        id: PolicyId,
        skip: &mut FxHashSet<PolicyId>,
    ) {
        let Some(idx) = self.slot_index(id) else {
            return;
        };
        if !self.slots[idx].active {
            return;
        }
        match self.invoke(world, id, Hook::Stop) {
            Some(Ok(())) => {
                self.set_active(id, false);
                self.note_fault_free(id);
            }
            Some(Err(e)) => self.contain_fault(world, id, Hook::Stop, &e, skip),
            None => {}
        }
        self.collect_removals(skip);
    }

    // ── Fault containment ─────────────────────────────────────────────────

    /// Resolve a fault from `hook`: log it, force the policy INACTIVE and
    /// out of the active set for this tick, and apply the configured
    /// [`FaultPolicy`].
    fn contain_fault(
        &mut self,
        world: &mut dyn WorldQuery,
        id: PolicyId,
        hook: Hook,
        error: &PolicyError,
        skip: &mut FxHashSet<PolicyId>,
    ) {
        warn!(
            agent = %self.agent,
            policy = %id,
            hook = ?hook,
            %error,
            "policy fault contained"
        );

        let Some(idx) = self.slot_index(id) else {
            return;
        };

        // Forced stop.  If the fault came from stop itself, don't invoke it
        // again; just force the flag.
        if self.slots[idx].active {
            if hook != Hook::Stop {
                if let Some(Err(nested)) = self.invoke(world, id, Hook::Stop) {
                    warn!(agent = %self.agent, policy = %id, error = %nested, "stop faulted during containment");
                }
            }
            self.set_active(id, false);
        }
        if self.primary == Some(id) {
            self.primary = None;
        }
        self.concurrent.retain(|&c| c != id);
        skip.insert(id);

        if let Some(idx) = self.slot_index(id) {
            self.slots[idx].fault_streak += 1;
            if let FaultPolicy::UnregisterAfter(limit) = self.config.fault_policy {
                if self.slots[idx].fault_streak >= limit {
                    warn!(
                        agent = %self.agent,
                        policy = %id,
                        streak = self.slots[idx].fault_streak,
                        "fault streak reached limit, deregistering policy"
                    );
                    self.pending.push(SchedulerCommand::Remove(id));
                }
            }
        }
    }

    // ── Command queue ─────────────────────────────────────────────────────

    /// Mark policies whose removal was requested mid-tick so the remaining
    /// phases skip them.  The registry entries are dropped in
    /// [`apply_pending`](Self::apply_pending).
    fn collect_removals(&self, skip: &mut FxHashSet<PolicyId>) {
        for command in &self.pending {
            if let SchedulerCommand::Remove(id) = command {
                skip.insert(*id);
            }
        }
    }

    /// Apply the structural changes queued during this tick.  Additions
    /// land in the next tick's snapshot.
    fn apply_pending(&mut self, world: &mut dyn WorldQuery) {
        let commands = std::mem::take(&mut self.pending);
        for command in commands {
            match command {
                SchedulerCommand::Add(policy) => match self.add_policy(policy) {
                    Ok(id) => debug!(agent = %self.agent, policy = %id, "policy added from command queue"),
                    Err(e) => warn!(agent = %self.agent, error = %e, "queued policy rejected"),
                },
                SchedulerCommand::Remove(id) => {
                    self.remove_policy(id, world);
                }
            }
        }
    }
}
