//! Scheduler configuration: concurrent capacity and fault resolution.

use crate::{SchedulerError, SchedulerResult};

/// What happens to a policy whose guard or lifecycle hooks keep failing.
///
/// A fault is always contained within the tick it occurs in (forced stop and
/// eviction from the active set); this policy decides the longer-term fate
/// of the offender.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FaultPolicy {
    /// Keep the policy registered and re-evaluate its guard every tick.
    /// A transient fault self-heals; a permanent one logs every tick.
    Retry,
    /// Deregister the policy after this many consecutive faulting ticks.
    /// A fault-free `update` (or `stop`) resets the count.
    UnregisterAfter(u32),
}

impl Default for FaultPolicy {
    fn default() -> Self {
        FaultPolicy::Retry
    }
}

/// Per-scheduler tuning knobs.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulerConfig {
    /// Upper bound on the concurrent set (secondary policies running
    /// alongside the primary).  The primary does not count against it.
    pub concurrent_capacity: usize,

    /// Resolution for persistently faulting policies.
    pub fault_policy: FaultPolicy,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            concurrent_capacity: 3,
            fault_policy:        FaultPolicy::default(),
        }
    }
}

impl SchedulerConfig {
    /// Validate the configuration.  Called by `BehaviorScheduler::new`.
    pub fn validate(&self) -> SchedulerResult<()> {
        if self.concurrent_capacity == 0 {
            return Err(SchedulerError::Config(
                "concurrent_capacity must be at least 1".into(),
            ));
        }
        if let FaultPolicy::UnregisterAfter(0) = self.fault_policy {
            return Err(SchedulerError::Config(
                "UnregisterAfter threshold must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
