//! The `WorldQuery` trait — the single capability boundary to the host world.

use mob_core::{AgentHandle, Vec3};

/// Terrain classification of one block position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockInfo {
    /// The block occupies its cell (an agent cannot stand inside it).
    pub solid: bool,
    /// The block is a liquid (water, lava).  A liquid never counts as
    /// footing even when the host also reports it solid.
    pub liquid: bool,
}

impl BlockInfo {
    pub const AIR: BlockInfo = BlockInfo { solid: false, liquid: false };
    pub const SOLID: BlockInfo = BlockInfo { solid: true, liquid: false };
    pub const LIQUID: BlockInfo = BlockInfo { solid: false, liquid: true };

    /// `true` if an agent can stand on top of this block.
    #[inline]
    pub fn is_footing(self) -> bool {
        self.solid && !self.liquid
    }
}

/// Capability interface supplied by the host simulation.
///
/// Policies and the navigator consume this trait; they never own agents or
/// terrain.  Reads (`query_nearby`, `classify_block`, `position`) take
/// `&self`; movement application (`set_velocity`, `teleport`) takes
/// `&mut self`.
///
/// # Handle validity
///
/// Every `AgentHandle` passed in is expected to refer to a live agent.  The
/// tick driver upholds this by updating only registered agents; hosts that
/// hand out stale handles get host-defined behavior (the test world panics).
pub trait WorldQuery {
    /// All agents whose positions fall within the axis-aligned box
    /// `pos ± (rx, ry, rz)`, **including** any agent standing at `pos`
    /// itself — the query is position-based and knows no "self".  Callers
    /// filter their own handle out when they only want neighbors.
    ///
    /// The returned order must be deterministic for identical world state;
    /// ascending `AgentHandle` is the conventional choice.
    fn query_nearby(&self, pos: Vec3, rx: f64, ry: f64, rz: f64) -> Vec<AgentHandle>;

    /// Terrain classification of the block containing `pos`.
    fn classify_block(&self, pos: Vec3) -> BlockInfo;

    /// Current position of `agent`.
    fn position(&self, agent: AgentHandle) -> Vec3;

    /// Apply a velocity to `agent`.  The host integrates it on its own
    /// physics step; the framework only ever writes the vector.
    fn set_velocity(&mut self, agent: AgentHandle, velocity: Vec3);

    /// Instantly relocate `agent` to `pos`.
    fn teleport(&mut self, agent: AgentHandle, pos: Vec3);
}
