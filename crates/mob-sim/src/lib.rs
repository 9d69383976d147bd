//! `mob-sim` — the tick driver for the mob_ai framework.
//!
//! # Crate layout
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`driver`]   | `TickDriver` — agent registration + per-tick loop      |
//! | [`observer`] | `TickObserver` callbacks, `NoopObserver`               |
//! | [`error`]    | `SimError`, `SimResult<T>`                             |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mob_behavior::presets::WanderPolicy;
//! use mob_scheduler::SchedulerConfig;
//! use mob_sim::{NoopObserver, TickDriver};
//! use mob_world::FlatWorld;
//!
//! let mut world = FlatWorld::new();
//! let agent = world.spawn(home);
//!
//! let mut driver = TickDriver::new(42);
//! driver.register_agent(agent, SchedulerConfig::default())?;
//! driver
//!     .scheduler_mut(agent)
//!     .unwrap()
//!     .add_policy(Box::new(WanderPolicy::new(home, 8.0)?))?;
//!
//! driver.run_ticks(1_000, &mut world, &mut NoopObserver);
//! ```

pub mod driver;
pub mod error;
pub mod observer;


pub use driver::TickDriver;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, TickObserver};
