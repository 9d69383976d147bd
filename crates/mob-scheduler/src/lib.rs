//! `mob-scheduler` — per-agent priority arbitration of behavior policies.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`scheduler`] | `BehaviorScheduler` — registry, arbitration, fault boundary |
//! | [`config`]    | `SchedulerConfig`, `FaultPolicy`                            |
//! | [`error`]     | `SchedulerError`, `SchedulerResult<T>`                      |
//!
//! # Design notes
//!
//! One scheduler exclusively owns one agent's policies; nothing is shared
//! across agents, so a driver updating agents sequentially needs no locking.
//! Each [`BehaviorScheduler::update`] call selects at most one primary policy
//! and a capacity-bounded concurrent set, with `stop()` always completing
//! before the replacing `start()`.  The scheduler is also the containment
//! boundary for policy faults: errors from guards and lifecycle hooks are
//! logged and resolved locally, never surfaced to the tick driver.

pub mod config;
pub mod error;
pub mod scheduler;


pub use config::{FaultPolicy, SchedulerConfig};
pub use error::{SchedulerError, SchedulerResult};
pub use scheduler::BehaviorScheduler;
