//! Flight response: run from the nearest threat, calm down back home.

use mob_nav::{MovementConstraints, SteeringNavigator};

use crate::presets::steer;
use crate::{
    BehaviorPolicy, InstinctState, PolicyContext, PolicyError, PolicyMood, PolicyResult,
};

const PRIORITY: f64 = 1.0;
const PRECISION: f64 = 1.0;

/// How much faster a panicking agent moves than its base speed.
const PANIC_SPEED_MULTIPLIER: f64 = 1.5;

/// Highest-priority flight behavior.
///
/// Eligible only while [`InstinctState::is_in_danger`] reports another agent
/// inside the danger radius.  While active the mood is
/// [`PolicyMood::Scared`]; each tick the agent flees one panic-step directly
/// away from the nearest threat.  On stop the mood resets and the agent
/// heads back toward home.
pub struct PanicPolicy {
    instinct: InstinctState,
    navigator: SteeringNavigator,
    panic_speed: f64,
    danger_radius: f64,
}

impl PanicPolicy {
    pub fn new(home: mob_core::Vec3, base_speed: f64, danger_radius: f64) -> PolicyResult<Self> {
        if !base_speed.is_finite() || base_speed <= 0.0 {
            return Err(PolicyError::Config(format!(
                "base_speed must be finite and > 0, got {base_speed}"
            )));
        }
        if !danger_radius.is_finite() || danger_radius <= 0.0 {
            return Err(PolicyError::Config(format!(
                "danger_radius must be finite and > 0, got {danger_radius}"
            )));
        }
        let panic_speed = base_speed * PANIC_SPEED_MULTIPLIER;
        Ok(Self {
            instinct: InstinctState::new(home),
            navigator: SteeringNavigator::new(panic_speed, PRECISION, MovementConstraints::default())?,
            panic_speed,
            danger_radius,
        })
    }

    pub fn instinct(&self) -> &InstinctState {
        &self.instinct
    }

    pub fn mood(&self) -> PolicyMood {
        self.instinct.mood
    }
}

impl BehaviorPolicy for PanicPolicy {
    fn priority(&self) -> f64 {
        PRIORITY
    }

    fn name(&self) -> &str {
        "panic"
    }

    fn guard(&self, ctx: &PolicyContext<'_>) -> PolicyResult<bool> {
        Ok(self.instinct.is_in_danger(ctx, self.danger_radius))
    }

    fn start(&mut self, _ctx: &mut PolicyContext<'_>) -> PolicyResult<()> {
        self.instinct.mood = PolicyMood::Scared;
        Ok(())
    }

    fn update(&mut self, ctx: &mut PolicyContext<'_>) -> PolicyResult<()> {
        let Some((threat, _)) = ctx.nearest_neighbor(self.danger_radius) else {
            // The guard will turn false and the scheduler stops us next tick.
            return Ok(());
        };

        let pos = ctx.position();
        let threat_pos = ctx.world.position(threat);
        // Directly on top of the threat there is no away-direction; hold
        // still and let the next tick's positions disambiguate.
        let Some(away) = (pos - threat_pos).normalized() else {
            return Ok(());
        };

        let flee_target = pos + away * self.panic_speed;
        steer(&mut self.navigator, ctx, flee_target)
    }

    fn stop(&mut self, ctx: &mut PolicyContext<'_>) -> PolicyResult<()> {
        self.instinct.mood = PolicyMood::Neutral;
        // Head back to where we started rather than stranding the agent
        // wherever the flight ended.
        let home = self.instinct.home();
        steer(&mut self.navigator, ctx, home)
    }
}
