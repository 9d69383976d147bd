//! The `TickDriver` — agent registration and the per-tick update loop.

use rustc_hash::FxHashMap;
use tracing::debug;

use mob_core::{AgentHandle, Tick};
use mob_scheduler::{BehaviorScheduler, SchedulerConfig};
use mob_world::WorldQuery;

use crate::{SimError, SimResult, TickObserver};

/// Drives one [`BehaviorScheduler`] per registered agent, once per fixed
/// simulation tick.
///
/// Explicitly constructed and owned by the embedding application — there is
/// no process-wide registrar.  Agents are updated sequentially in
/// registration order, which together with the seed-derived per-agent RNGs
/// makes a run fully deterministic: same seed, same registrations, same
/// world, same outcome.
///
/// Registration and deregistration are expected at tick boundaries (between
/// [`tick`](Self::tick) calls), per the single-threaded cooperative model.
pub struct TickDriver {
    global_seed: u64,
    clock:       Tick,
    /// Update order: agents run in the order they were registered.
    order:       Vec<AgentHandle>,
    schedulers:  FxHashMap<AgentHandle, BehaviorScheduler>,
}

impl TickDriver {
    /// Create an empty driver.  `global_seed` is mixed into every agent's
    /// scheduler RNG.
    pub fn new(global_seed: u64) -> Self {
        Self {
            global_seed,
            clock: Tick::ZERO,
            order: Vec::new(),
            schedulers: FxHashMap::default(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// The next tick to be executed.
    pub fn current_tick(&self) -> Tick {
        self.clock
    }

    pub fn agent_count(&self) -> usize {
        self.order.len()
    }

    pub fn is_registered(&self, agent: AgentHandle) -> bool {
        self.schedulers.contains_key(&agent)
    }

    /// The scheduler owned by `agent`, if registered.
    pub fn scheduler(&self, agent: AgentHandle) -> Option<&BehaviorScheduler> {
        self.schedulers.get(&agent)
    }

    /// Mutable access to an agent's scheduler, for policy registration.
    pub fn scheduler_mut(&mut self, agent: AgentHandle) -> Option<&mut BehaviorScheduler> {
        self.schedulers.get_mut(&agent)
    }

    // ── Registration lifecycle ────────────────────────────────────────────

    /// Register `agent` with a fresh scheduler built from `config`.
    ///
    /// Policies are then added through
    /// [`scheduler_mut`](Self::scheduler_mut).  Registering the same agent
    /// twice is an error.
    pub fn register_agent(
        &mut self,
        agent: AgentHandle,
        config: SchedulerConfig,
    ) -> SimResult<()> {
        if self.is_registered(agent) {
            return Err(SimError::DuplicateAgent(agent));
        }
        let scheduler = BehaviorScheduler::new(agent, config, self.global_seed)?;
        self.order.push(agent);
        self.schedulers.insert(agent, scheduler);
        debug!(agent = %agent, "agent registered");
        Ok(())
    }

    /// Deregister `agent`, stopping all of its active policies first.
    ///
    /// Returns `false` if the agent was not registered.
    pub fn deregister_agent(&mut self, agent: AgentHandle, world: &mut dyn WorldQuery) -> bool {
        let Some(mut scheduler) = self.schedulers.remove(&agent) else {
            return false;
        };
        scheduler.clear_all(world);
        self.order.retain(|&a| a != agent);
        debug!(agent = %agent, "agent deregistered");
        true
    }

    // ── The tick loop ─────────────────────────────────────────────────────

    /// Run one tick: update every registered agent's scheduler in
    /// registration order, then advance the clock.
    pub fn tick(&mut self, world: &mut dyn WorldQuery) {
        for &agent in &self.order {
            // Registration order is the single source of membership truth;
            // the map lookup cannot miss.
            if let Some(scheduler) = self.schedulers.get_mut(&agent) {
                scheduler.update(world);
            }
        }
        self.clock = self.clock + 1;
    }

    /// Run exactly `n` ticks, with observer callbacks at each boundary.
    pub fn run_ticks<O: TickObserver>(
        &mut self,
        n: u64,
        world: &mut dyn WorldQuery,
        observer: &mut O,
    ) {
        for _ in 0..n {
            let now = self.clock;
            observer.on_tick_start(now);
            self.tick(world);
            observer.on_tick_end(now, self.order.len());
        }
    }
}
