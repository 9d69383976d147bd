//! `mob-core` — foundational types for the `mob_ai` agent framework.
//!
//! This crate is a dependency of every other `mob-*` crate.  It intentionally
//! has no `mob-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                                          |
//! |----------|---------------------------------------------------|
//! | [`ids`]  | `AgentHandle`, `PolicyId`                         |
//! | [`vec3`] | `Vec3` — f64 position/velocity vector             |
//! | [`time`] | `Tick` — monotonic simulation tick counter        |
//! | [`rng`]  | `AgentRng` — deterministic per-agent RNG          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod ids;
pub mod rng;
pub mod time;
pub mod vec3;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::{AgentHandle, PolicyId};
pub use rng::AgentRng;
pub use time::Tick;
pub use vec3::Vec3;
