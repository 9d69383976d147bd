//! `mob-behavior` — the behavior policy contract and preset policies.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`policy`]  | `BehaviorPolicy` trait — the main extension point             |
//! | [`context`] | `PolicyContext` — per-tick view lent to every lifecycle call; `SchedulerCommand` |
//! | [`state`]   | `InstinctState` — mood + home-location bundle, danger helper  |
//! | [`noop`]    | `NoopPolicy` — placeholder that never steers                  |
//! | [`presets`] | Ready-made policies: wander, panic, hunt, territorial, social |
//! | [`error`]   | `PolicyError`, `PolicyResult<T>`                              |
//!
//! # Design notes
//!
//! A policy is a `Box<dyn BehaviorPolicy>` owned by one scheduler.  Lifecycle
//! calls receive a [`PolicyContext`] carrying the agent handle, the world
//! capability, the agent's deterministic RNG, and a command sink.  Structural
//! changes to the owning scheduler (spawning or retiring policies from inside
//! a lifecycle hook) are expressed as queued [`SchedulerCommand`]s rather than
//! direct calls — the scheduler applies them at a well-defined point in its
//! tick, which is what makes re-entrant registration safe.
//!
//! Richer policies compose [`InstinctState`] (mood, home location, a shared
//! danger check) instead of inheriting from an "enhanced" base: plain struct
//! fields, no hierarchy.

pub mod context;
pub mod error;
pub mod noop;
pub mod policy;
pub mod presets;
pub mod state;


pub use context::{PolicyContext, SchedulerCommand};
pub use error::{PolicyError, PolicyResult};
pub use noop::NoopPolicy;
pub use policy::BehaviorPolicy;
pub use state::{InstinctState, PolicyMood};
