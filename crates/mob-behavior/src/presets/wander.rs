//! Idle roaming near the home location.

use std::f64::consts::TAU;

use mob_core::Vec3;
use mob_nav::{MovementConstraints, SteeringNavigator};

use crate::presets::steer;
use crate::{BehaviorPolicy, InstinctState, PolicyContext, PolicyError, PolicyResult};

const PRIORITY: f64 = 0.3;
const SPEED: f64 = 0.4;
const PRECISION: f64 = 2.0;

/// Chance per tick of re-rolling the destination even before arriving,
/// so long walks occasionally change course.
const REROLL_CHANCE: f64 = 0.1;

/// Low-priority roaming: picks random destinations inside a disc around the
/// home location and ambles toward them.
pub struct WanderPolicy {
    instinct: InstinctState,
    navigator: SteeringNavigator,
    wander_radius: f64,
}

impl WanderPolicy {
    /// `home` is captured as the roaming center; `wander_radius` bounds how
    /// far destinations may stray from it.
    pub fn new(home: Vec3, wander_radius: f64) -> PolicyResult<Self> {
        if !wander_radius.is_finite() || wander_radius <= 0.0 {
            return Err(PolicyError::Config(format!(
                "wander_radius must be finite and > 0, got {wander_radius}"
            )));
        }
        Ok(Self {
            instinct: InstinctState::new(home),
            navigator: SteeringNavigator::new(SPEED, PRECISION, MovementConstraints::default())?,
            wander_radius,
        })
    }

    pub fn instinct(&self) -> &InstinctState {
        &self.instinct
    }

    fn random_destination(&self, ctx: &mut PolicyContext<'_>) -> Vec3 {
        let angle = ctx.rng.gen_range(0.0..TAU);
        let distance = ctx.rng.gen_range(0.0..self.wander_radius);
        self.instinct.home() + Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
    }
}

impl BehaviorPolicy for WanderPolicy {
    fn priority(&self) -> f64 {
        PRIORITY
    }

    fn name(&self) -> &str {
        "wander"
    }

    fn start(&mut self, _ctx: &mut PolicyContext<'_>) -> PolicyResult<()> {
        Ok(())
    }

    fn update(&mut self, ctx: &mut PolicyContext<'_>) -> PolicyResult<()> {
        let arrived = self.navigator.destination().is_none()
            || self.navigator.has_reached_destination(ctx.agent, ctx.world);
        if arrived || ctx.rng.gen_bool(REROLL_CHANCE) {
            let destination = self.random_destination(ctx);
            steer(&mut self.navigator, ctx, destination)?;
        } else if let Some(goal) = self.navigator.destination().copied() {
            steer(&mut self.navigator, ctx, goal.target)?;
        }
        Ok(())
    }

    fn stop(&mut self, ctx: &mut PolicyContext<'_>) -> PolicyResult<()> {
        self.navigator.stop(ctx.agent, ctx.world);
        Ok(())
    }
}
