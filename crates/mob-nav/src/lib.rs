//! `mob-nav` — velocity-based local steering toward a goal.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`navigator`] | `SteeringNavigator`, `NavigationGoal`, `MovementConstraints` |
//! | [`error`]     | `NavError`, `NavResult<T>`                               |
//!
//! # Design notes
//!
//! The navigator uses **only local information**: one terrain probe per
//! candidate step, at most nine candidates per call.  There is no path
//! graph and no search beyond the fixed probe fan, so a navigation step is
//! O(1) and safe to run for every agent every tick.
//!
//! When the direct step is blocked, eight alternate directions are evaluated
//! in a fixed order and the first valid one is taken at reduced speed.  The
//! fixed order is deliberate: identical terrain always produces identical
//! movement, which is what makes replay and testing deterministic.

pub mod error;
pub mod navigator;

#[cfg(test)]
mod tests;

pub use error::{NavError, NavResult};
pub use navigator::{MovementConstraints, NavigationGoal, SteeringNavigator};
