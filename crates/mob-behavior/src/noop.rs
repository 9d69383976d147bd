//! `NoopPolicy` — a placeholder policy that never steers.

use crate::{BehaviorPolicy, PolicyContext, PolicyResult};

/// A policy that is always eligible and does nothing.
///
/// Useful as a lowest-priority idle fallback and as a stand-in in tests.
pub struct NoopPolicy {
    priority: f64,
}

impl NoopPolicy {
    pub fn new(priority: f64) -> Self {
        Self { priority }
    }
}

impl BehaviorPolicy for NoopPolicy {
    fn priority(&self) -> f64 {
        self.priority
    }

    fn name(&self) -> &str {
        "noop"
    }

    fn start(&mut self, _ctx: &mut PolicyContext<'_>) -> PolicyResult<()> {
        Ok(())
    }

    fn update(&mut self, _ctx: &mut PolicyContext<'_>) -> PolicyResult<()> {
        Ok(())
    }

    fn stop(&mut self, _ctx: &mut PolicyContext<'_>) -> PolicyResult<()> {
        Ok(())
    }
}
