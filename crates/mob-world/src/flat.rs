//! `FlatWorld` — a minimal in-memory world implementing [`WorldQuery`].
//!
//! # Terrain model
//!
//! Terrain is a column heightmap: every `(x, z)` column has a ground height
//! `g` (default 0), and the block cell at integer `y` is solid iff `y < g`.
//! So with the default height the surface sits at `y = 0` and agents stand
//! at `y = 0.0` on solid footing.  Individual cells can be overridden with
//! [`set_obstacle`](FlatWorld::set_obstacle) and
//! [`set_liquid`](FlatWorld::set_liquid) to build walls, pits, and ponds for
//! navigation tests.
//!
//! # Physics
//!
//! There is none.  `set_velocity` records the vector; a host engine would
//! integrate it on its physics step.  Tests that need movement call
//! [`integrate`](FlatWorld::integrate) to apply one Euler step per tick.

use rustc_hash::{FxHashMap, FxHashSet};

use mob_core::{AgentHandle, Vec3};

use crate::{BlockInfo, WorldQuery};

/// Integer block-cell coordinate.
type Cell = (i64, i64, i64);

#[derive(Clone, Debug, Default)]
struct Body {
    pos: Vec3,
    vel: Vec3,
}

/// In-memory grid world used by the workspace's tests and demos.
#[derive(Default)]
pub struct FlatWorld {
    bodies: Vec<Body>,
    ground: FxHashMap<(i64, i64), i64>,
    obstacles: FxHashSet<Cell>,
    liquids: FxHashSet<Cell>,
}

impl FlatWorld {
    /// An empty world: flat ground at height 0, no agents.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Agents ────────────────────────────────────────────────────────────

    /// Add an agent at `pos` and return its handle.
    ///
    /// Handles are assigned sequentially from zero and never reused.
    pub fn spawn(&mut self, pos: Vec3) -> AgentHandle {
        let handle = AgentHandle(self.bodies.len() as u32);
        self.bodies.push(Body { pos, vel: Vec3::ZERO });
        handle
    }

    pub fn agent_count(&self) -> usize {
        self.bodies.len()
    }

    /// Current velocity of `agent` (most recent `set_velocity` write).
    pub fn velocity(&self, agent: AgentHandle) -> Vec3 {
        self.bodies[agent.index()].vel
    }

    /// Apply one Euler step: `pos += vel` for every agent.
    ///
    /// Stands in for the host engine's physics integration in tests.
    pub fn integrate(&mut self) {
        for body in &mut self.bodies {
            body.pos += body.vel;
        }
    }

    // ── Terrain authoring ─────────────────────────────────────────────────

    /// Set the ground height of column `(x, z)`: cells below `height` are
    /// solid, cells at or above it are air.
    pub fn set_ground(&mut self, x: i64, z: i64, height: i64) {
        self.ground.insert((x, z), height);
    }

    /// Mark a single cell solid regardless of the column height.
    pub fn set_obstacle(&mut self, x: i64, y: i64, z: i64) {
        self.obstacles.insert((x, y, z));
    }

    /// Mark a single cell liquid.  Liquid cells are never footing.
    pub fn set_liquid(&mut self, x: i64, y: i64, z: i64) {
        self.liquids.insert((x, y, z));
    }

    fn ground_height(&self, x: i64, z: i64) -> i64 {
        self.ground.get(&(x, z)).copied().unwrap_or(0)
    }

    fn cell_of(pos: Vec3) -> Cell {
        (
            pos.x.floor() as i64,
            pos.y.floor() as i64,
            pos.z.floor() as i64,
        )
    }
}

impl WorldQuery for FlatWorld {
    fn query_nearby(&self, pos: Vec3, rx: f64, ry: f64, rz: f64) -> Vec<AgentHandle> {
        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, b)| b.pos.within_box(pos, rx, ry, rz))
            .map(|(i, _)| AgentHandle(i as u32))
            .collect()
    }

    fn classify_block(&self, pos: Vec3) -> BlockInfo {
        let cell = Self::cell_of(pos);
        if self.liquids.contains(&cell) {
            return BlockInfo::LIQUID;
        }
        if self.obstacles.contains(&cell) {
            return BlockInfo::SOLID;
        }
        if cell.1 < self.ground_height(cell.0, cell.2) {
            BlockInfo::SOLID
        } else {
            BlockInfo::AIR
        }
    }

    fn position(&self, agent: AgentHandle) -> Vec3 {
        self.bodies[agent.index()].pos
    }

    fn set_velocity(&mut self, agent: AgentHandle, velocity: Vec3) {
        self.bodies[agent.index()].vel = velocity;
    }

    fn teleport(&mut self, agent: AgentHandle, pos: Vec3) {
        let body = &mut self.bodies[agent.index()];
        body.pos = pos;
        body.vel = Vec3::ZERO;
    }
}
