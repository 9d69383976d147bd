//! `mob-world` — the world capability boundary of the `mob_ai` framework.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                   |
//! |-----------|------------------------------------------------------------|
//! | [`query`] | `WorldQuery` trait, `BlockInfo` — the host-facing contract |
//! | [`flat`]  | `FlatWorld` — in-memory grid world for tests and demos     |
//!
//! # Design notes
//!
//! The framework never talks to a host engine directly.  Everything a policy
//! or the navigator needs from the world — proximity search, terrain
//! classification, movement application — goes through the [`WorldQuery`]
//! trait, injected by whoever wires the tick driver.  No inheritance from
//! host types, no global engine handle.
//!
//! [`FlatWorld`] is a conforming implementation backed by a column heightmap.
//! It exists so every other crate in the workspace can be tested without a
//! host engine; it is not part of the contract.

pub mod flat;
pub mod query;

#[cfg(test)]
mod tests;

pub use flat::FlatWorld;
pub use query::{BlockInfo, WorldQuery};
