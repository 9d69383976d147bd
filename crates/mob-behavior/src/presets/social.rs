//! Sociability: seek out the nearest neighbor and mingle.

use mob_core::AgentHandle;
use mob_nav::{MovementConstraints, SteeringNavigator};

use crate::presets::steer;
use crate::{
    BehaviorPolicy, InstinctState, PolicyContext, PolicyMood, PolicyResult,
};

const PRIORITY: f64 = 0.4;
const SPEED: f64 = 0.5;
const PRECISION: f64 = 2.0;

const SEARCH_RADIUS: f64 = 10.0;
const INTERACTION_DISTANCE: f64 = 3.0;

/// Medium-low-priority mingling: approach the nearest agent within
/// [`SEARCH_RADIUS`]; once inside [`INTERACTION_DISTANCE`] the interaction
/// flips the mood to `Playful` or `Curious` at random.
///
/// The host-side flourish of the interaction (sound, particles) is the
/// embedding application's concern; [`partner`](Self::partner) exposes who
/// is being interacted with.
pub struct SocialPolicy {
    instinct: InstinctState,
    navigator: SteeringNavigator,
    partner: Option<AgentHandle>,
}

impl SocialPolicy {
    pub fn new(home: mob_core::Vec3) -> PolicyResult<Self> {
        Ok(Self {
            instinct: InstinctState::new(home),
            navigator: SteeringNavigator::new(SPEED, PRECISION, MovementConstraints::default())?,
            partner: None,
        })
    }

    pub fn instinct(&self) -> &InstinctState {
        &self.instinct
    }

    pub fn mood(&self) -> PolicyMood {
        self.instinct.mood
    }

    /// The current social partner, if one is in range.
    pub fn partner(&self) -> Option<AgentHandle> {
        self.partner
    }
}

impl BehaviorPolicy for SocialPolicy {
    fn priority(&self) -> f64 {
        PRIORITY
    }

    fn name(&self) -> &str {
        "social"
    }

    fn start(&mut self, _ctx: &mut PolicyContext<'_>) -> PolicyResult<()> {
        Ok(())
    }

    fn update(&mut self, ctx: &mut PolicyContext<'_>) -> PolicyResult<()> {
        let Some((partner, distance)) = ctx.nearest_neighbor(SEARCH_RADIUS) else {
            self.partner = None;
            return Ok(());
        };

        self.partner = Some(partner);
        let partner_pos = ctx.world.position(partner);
        steer(&mut self.navigator, ctx, partner_pos)?;

        if distance <= INTERACTION_DISTANCE {
            self.instinct.mood = if ctx.rng.gen_bool(0.5) {
                PolicyMood::Playful
            } else {
                PolicyMood::Curious
            };
        }
        Ok(())
    }

    fn stop(&mut self, ctx: &mut PolicyContext<'_>) -> PolicyResult<()> {
        self.partner = None;
        self.navigator.stop(ctx.agent, ctx.world);
        Ok(())
    }
}
