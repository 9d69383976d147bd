//! Tick observer trait for progress reporting and data collection.

use mob_core::Tick;

/// Callbacks invoked by [`TickDriver::run_ticks`][crate::TickDriver::run_ticks]
/// at tick boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl TickObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, agents: usize) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: updated {agents} agents");
///         }
///     }
/// }
/// ```
pub trait TickObserver {
    /// Called at the very start of each tick, before any scheduler runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    ///
    /// `agents` is the number of registered agents updated this tick.
    fn on_tick_end(&mut self, _tick: Tick, _agents: usize) {}
}

/// A [`TickObserver`] that does nothing.  Use when you need to call
/// `run_ticks` but don't want progress callbacks.
pub struct NoopObserver;

impl TickObserver for NoopObserver {}
