//! Territory keeping: return to the territory center when outside it.

use mob_core::Vec3;
use mob_nav::{MovementConstraints, SteeringNavigator};

use crate::presets::steer;
use crate::{BehaviorPolicy, PolicyContext, PolicyError, PolicyResult};

const PRIORITY: f64 = 0.7;
const SPEED: f64 = 0.5;
const PRECISION: f64 = 1.0;

/// Keeps the agent inside a circular territory: whenever the agent is
/// farther than `territory_radius` from `center`, it steers back toward the
/// center.  Inside the territory it does not move the agent at all, leaving
/// lower-priority concurrent policies (wander, social) free to steer.
pub struct TerritorialPolicy {
    navigator: SteeringNavigator,
    center: Vec3,
    territory_radius: f64,
}

impl TerritorialPolicy {
    pub fn new(center: Vec3, territory_radius: f64) -> PolicyResult<Self> {
        if !territory_radius.is_finite() || territory_radius <= 0.0 {
            return Err(PolicyError::Config(format!(
                "territory_radius must be finite and > 0, got {territory_radius}"
            )));
        }
        Ok(Self {
            navigator: SteeringNavigator::new(SPEED, PRECISION, MovementConstraints::default())?,
            center,
            territory_radius,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// `true` if `pos` lies within the territory.
    pub fn contains(&self, pos: Vec3) -> bool {
        pos.distance(self.center) <= self.territory_radius
    }
}

impl BehaviorPolicy for TerritorialPolicy {
    fn priority(&self) -> f64 {
        PRIORITY
    }

    fn name(&self) -> &str {
        "territorial"
    }

    fn start(&mut self, _ctx: &mut PolicyContext<'_>) -> PolicyResult<()> {
        Ok(())
    }

    fn update(&mut self, ctx: &mut PolicyContext<'_>) -> PolicyResult<()> {
        if !self.contains(ctx.position()) {
            let center = self.center;
            steer(&mut self.navigator, ctx, center)?;
        }
        Ok(())
    }

    fn stop(&mut self, ctx: &mut PolicyContext<'_>) -> PolicyResult<()> {
        self.navigator.stop(ctx.agent, ctx.world);
        Ok(())
    }
}
