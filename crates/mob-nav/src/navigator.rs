//! The steering navigator: direct step, obstacle probe, terrain validation.

use mob_core::{AgentHandle, Vec3};
use mob_world::WorldQuery;
use tracing::trace;

use crate::{NavError, NavResult};

/// Speed multiplier applied when steering through a probe alternate rather
/// than the direct path.
const CAUTIOUS_SPEED_FACTOR: f64 = 0.8;

/// The eight alternate offsets evaluated when the direct step is invalid,
/// in fixed order.  Each is summed with the desired direction and the result
/// renormalized.  The order is part of the contract: the first valid
/// alternate wins, so identical terrain yields identical movement.
const PROBE_OFFSETS: [Vec3; 8] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 0.0, -1.0),
    Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(-1.0, 0.0, -1.0),
    Vec3::new(1.0, 0.0, -1.0),
    Vec3::new(-1.0, 0.0, 1.0),
];

// ── MovementConstraints ───────────────────────────────────────────────────────

/// Vertical movement limits, fixed per navigator instance.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementConstraints {
    /// Maximum upward step height accepted in one tick.
    pub max_climb: f64,
    /// Maximum downward drop accepted in one tick.
    pub max_fall: f64,
}

impl Default for MovementConstraints {
    /// One-block climb, three-block fall — the usual land-creature limits.
    fn default() -> Self {
        Self { max_climb: 1.0, max_fall: 3.0 }
    }
}

// ── NavigationGoal ────────────────────────────────────────────────────────────

/// A recorded destination together with the parameters it was issued under.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigationGoal {
    /// Target position.
    pub target: Vec3,
    /// Distance covered per tick on the direct path.
    pub speed: f64,
    /// Distance under which the goal counts as reached.
    pub precision: f64,
}

// ── SteeringNavigator ─────────────────────────────────────────────────────────

/// Per-agent steering controller.
///
/// Owns no agent state beyond the recorded destination; position reads and
/// velocity writes go through the injected [`WorldQuery`].  One navigator is
/// typically owned by each policy that moves its agent, mirroring how each
/// behavior carries its own speed and precision.
#[derive(Debug)]
pub struct SteeringNavigator {
    speed: f64,
    precision: f64,
    constraints: MovementConstraints,
    destination: Option<NavigationGoal>,
}

impl SteeringNavigator {
    /// Create a navigator.
    ///
    /// Fails fast with [`NavError::Config`] on a non-positive or non-finite
    /// speed, a negative or non-finite precision, or negative constraints —
    /// a navigator that passed construction is always usable.
    pub fn new(
        speed: f64,
        precision: f64,
        constraints: MovementConstraints,
    ) -> NavResult<Self> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(NavError::Config(format!("speed must be finite and > 0, got {speed}")));
        }
        if !precision.is_finite() || precision < 0.0 {
            return Err(NavError::Config(format!(
                "precision must be finite and >= 0, got {precision}"
            )));
        }
        if !constraints.max_climb.is_finite() || constraints.max_climb < 0.0 {
            return Err(NavError::Config(format!(
                "max_climb must be finite and >= 0, got {}",
                constraints.max_climb
            )));
        }
        if !constraints.max_fall.is_finite() || constraints.max_fall < 0.0 {
            return Err(NavError::Config(format!(
                "max_fall must be finite and >= 0, got {}",
                constraints.max_fall
            )));
        }
        Ok(Self { speed, precision, constraints, destination: None })
    }

    /// The currently recorded destination, if any.
    pub fn destination(&self) -> Option<&NavigationGoal> {
        self.destination.as_ref()
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    // ── Steering ──────────────────────────────────────────────────────────

    /// Steer `agent` one tick toward `target`.
    ///
    /// Records `target` as the destination, then:
    ///
    /// - within the precision radius: applies no velocity (the goal counts
    ///   as reached; [`has_reached_destination`](Self::has_reached_destination)
    ///   will return `true`);
    /// - direct candidate step valid: applies full-speed velocity along the
    ///   direct direction;
    /// - otherwise probes the eight alternates in fixed order and applies
    ///   the first valid one at `speed × 0.8`;
    /// - all nine candidates invalid: returns [`NavError::Blocked`] leaving
    ///   velocity and destination untouched, so a later call retries.
    pub fn move_to(
        &mut self,
        agent: AgentHandle,
        target: Vec3,
        world: &mut dyn WorldQuery,
    ) -> NavResult<()> {
        self.destination = Some(NavigationGoal {
            target,
            speed: self.speed,
            precision: self.precision,
        });

        let pos = world.position(agent);
        let to_target = target - pos;
        if to_target.length() <= self.precision {
            return Ok(());
        }

        // normalized() cannot fail here: the distance exceeds precision >= 0.
        let Some(direction) = to_target.normalized() else {
            return Ok(());
        };

        let candidate = pos + direction * self.speed;
        if self.step_valid(world, pos, candidate) {
            world.set_velocity(agent, direction * self.speed);
            return Ok(());
        }

        for (i, offset) in PROBE_OFFSETS.iter().enumerate() {
            // Offset opposite to the direction can cancel it out entirely;
            // a degenerate sum is simply not a candidate.
            let Some(alternate) = (direction + *offset).normalized() else {
                continue;
            };
            let candidate = pos + alternate * self.speed;
            if self.step_valid(world, pos, candidate) {
                trace!(agent = %agent, probe = i, "direct path blocked, steering via probe");
                world.set_velocity(agent, alternate * (self.speed * CAUTIOUS_SPEED_FACTOR));
                return Ok(());
            }
        }

        trace!(agent = %agent, from = %pos, target = %target, "all nine step candidates invalid");
        Err(NavError::Blocked { from: pos, target })
    }

    /// `true` iff a destination is recorded and the agent is within its
    /// precision radius.
    pub fn has_reached_destination(&self, agent: AgentHandle, world: &dyn WorldQuery) -> bool {
        match &self.destination {
            Some(goal) => world.position(agent).distance(goal.target) <= goal.precision,
            None => false,
        }
    }

    /// Zero the agent's velocity and clear the destination.  Idempotent.
    pub fn stop(&mut self, agent: AgentHandle, world: &mut dyn WorldQuery) {
        world.set_velocity(agent, Vec3::ZERO);
        self.destination = None;
    }

    // ── Terrain validation ────────────────────────────────────────────────

    /// A candidate position is steppable iff:
    ///
    /// - the block one step below it is solid and not liquid (footing),
    /// - neither the feet nor the head space is solid (unobstructed),
    /// - the vertical delta from `from` lies within
    ///   `[-max_fall, +max_climb]`.
    pub(crate) fn step_valid(
        &self,
        world: &dyn WorldQuery,
        from: Vec3,
        candidate: Vec3,
    ) -> bool {
        let below = world.classify_block(candidate + Vec3::new(0.0, -1.0, 0.0));
        if !below.is_footing() {
            return false;
        }

        let feet = world.classify_block(candidate);
        let head = world.classify_block(candidate + Vec3::new(0.0, 1.0, 0.0));
        if feet.solid || head.solid {
            return false;
        }

        let dy = candidate.y - from.y;
        dy <= self.constraints.max_climb && -dy <= self.constraints.max_fall
    }
}
