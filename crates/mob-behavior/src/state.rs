//! Shared state bundle for richer policies: mood, home location, danger check.
//!
//! A plain struct composed into whichever policies want it.  No base-policy
//! hierarchy: a policy that models mood holds an `InstinctState` field.

use mob_core::Vec3;

use crate::PolicyContext;

/// Coarse emotional state of an agent, surfaced by policies that model it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PolicyMood {
    #[default]
    Neutral,
    Scared,
    Playful,
    Curious,
}

/// Mood + home-location bundle composed into preset policies.
///
/// The home location is captured once at construction and never changes;
/// policies that retreat or wander do so relative to it.
#[derive(Clone, Debug)]
pub struct InstinctState {
    /// Current mood.  Policies mutate this freely.
    pub mood: PolicyMood,
    home: Vec3,
}

impl InstinctState {
    pub fn new(home: Vec3) -> Self {
        Self { mood: PolicyMood::Neutral, home }
    }

    /// The immutable home location.
    #[inline]
    pub fn home(&self) -> Vec3 {
        self.home
    }

    /// `true` if any other agent stands within `radius` of this agent.
    ///
    /// The shared danger predicate used by panic-style guards.  Proximity is
    /// the only signal the `WorldQuery` capability exposes; host-specific
    /// threat modelling (health, hostility) belongs in custom policies.
    pub fn is_in_danger(&self, ctx: &PolicyContext<'_>, radius: f64) -> bool {
        ctx.nearest_neighbor(radius).is_some()
    }
}
