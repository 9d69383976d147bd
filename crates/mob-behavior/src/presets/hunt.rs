//! Pursuit: chase the nearest agent inside a search radius.

use mob_core::AgentHandle;
use mob_nav::{MovementConstraints, SteeringNavigator};

use crate::presets::steer;
use crate::{BehaviorPolicy, PolicyContext, PolicyError, PolicyResult};

const PRIORITY: f64 = 0.8;
const SPEED: f64 = 0.6;
const PRECISION: f64 = 2.0;

/// Chases the nearest agent within `search_radius`, re-targeting every tick.
///
/// The actual attack (damage, pickup, …) is a host effect outside the world
/// capability; embedders watch [`quarry`](Self::quarry) and the distance to
/// it to trigger their own interaction.
pub struct HuntPolicy {
    navigator: SteeringNavigator,
    search_radius: f64,
    quarry: Option<AgentHandle>,
}

impl HuntPolicy {
    pub fn new(search_radius: f64) -> PolicyResult<Self> {
        if !search_radius.is_finite() || search_radius <= 0.0 {
            return Err(PolicyError::Config(format!(
                "search_radius must be finite and > 0, got {search_radius}"
            )));
        }
        Ok(Self {
            navigator: SteeringNavigator::new(SPEED, PRECISION, MovementConstraints::default())?,
            search_radius,
            quarry: None,
        })
    }

    /// The agent currently being pursued, if any.
    pub fn quarry(&self) -> Option<AgentHandle> {
        self.quarry
    }
}

impl BehaviorPolicy for HuntPolicy {
    fn priority(&self) -> f64 {
        PRIORITY
    }

    fn name(&self) -> &str {
        "hunt"
    }

    fn start(&mut self, _ctx: &mut PolicyContext<'_>) -> PolicyResult<()> {
        Ok(())
    }

    fn update(&mut self, ctx: &mut PolicyContext<'_>) -> PolicyResult<()> {
        match ctx.nearest_neighbor(self.search_radius) {
            Some((target, _)) => {
                self.quarry = Some(target);
                let target_pos = ctx.world.position(target);
                steer(&mut self.navigator, ctx, target_pos)?;
            }
            None => {
                self.quarry = None;
            }
        }
        Ok(())
    }

    fn stop(&mut self, ctx: &mut PolicyContext<'_>) -> PolicyResult<()> {
        self.quarry = None;
        self.navigator.stop(ctx.agent, ctx.world);
        Ok(())
    }
}
