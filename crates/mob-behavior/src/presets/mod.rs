//! Ready-made policies for common creature archetypes.
//!
//! Each preset is a complete [`BehaviorPolicy`](crate::BehaviorPolicy) with
//! a fixed arbitration priority chosen so the presets compose sensibly when
//! stacked on one scheduler:
//!
//! | Preset                | Priority | Runs when                             |
//! |-----------------------|----------|---------------------------------------|
//! | [`PanicPolicy`]       | 1.0      | another agent is inside the danger radius |
//! | [`HuntPolicy`]        | 0.8      | always (chases the nearest quarry)    |
//! | [`TerritorialPolicy`] | 0.7      | always (returns when outside territory) |
//! | [`SocialPolicy`]      | 0.4      | always (approaches the nearest neighbor) |
//! | [`WanderPolicy`]      | 0.3      | always (idle roaming near home)       |
//!
//! Presets carry movement, targeting, and mood only.  Host-side effects
//! (damage, sounds, particles) are the embedding application's concern and
//! have no counterpart in the `WorldQuery` capability.

mod hunt;
mod panic;
mod social;
mod territorial;
mod wander;

pub use hunt::HuntPolicy;
pub use panic::PanicPolicy;
pub use social::SocialPolicy;
pub use territorial::TerritorialPolicy;
pub use wander::WanderPolicy;

use mob_core::Vec3;
use mob_nav::{NavError, SteeringNavigator};

use crate::{PolicyContext, PolicyResult};

/// Steer toward `target`, treating a blocked path as "try again next tick".
///
/// `NavigationBlocked` is a recoverable outcome: the navigator keeps the
/// destination and the prior velocity, so the preset simply waits for the
/// terrain (or its own position) to change.  Configuration errors still
/// propagate.
pub(crate) fn steer(
    navigator: &mut SteeringNavigator,
    ctx: &mut PolicyContext<'_>,
    target: Vec3,
) -> PolicyResult<()> {
    match navigator.move_to(ctx.agent, target, ctx.world) {
        Ok(()) | Err(NavError::Blocked { .. }) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
