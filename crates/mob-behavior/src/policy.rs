//! The `BehaviorPolicy` trait — the main extension point for user code.

use crate::{PolicyContext, PolicyResult};

/// Pluggable agent behavior.
///
/// Implement this trait to define one unit of agent logic: a guard deciding
/// when the policy is eligible, and three lifecycle hooks.  Policies are
/// registered into one `BehaviorScheduler`, which arbitrates between them by
/// [`priority`][Self::priority] every tick.
///
/// # Lifecycle
///
/// ```text
/// INACTIVE ──start()──▶ ACTIVE ──update()──▶ ACTIVE
///                          │
///                        stop()
///                          ▼
///                       INACTIVE
/// ```
///
/// The scheduler upholds the ordering guarantees: `stop()` on an outgoing
/// policy completes before `start()` on its replacement, `start()` precedes
/// the first `update()` of an activation, and `stop()` is never
/// double-invoked.  The active flag is tracked by the scheduler, not the
/// policy.
///
/// # Failure
///
/// Any `Err` returned from the guard or a lifecycle hook is caught at the
/// scheduler boundary, logged, and resolved as a forced stop-and-evict for
/// that tick.  A faulting policy stays registered and is retried (guard
/// re-evaluated) on the next tick unless the scheduler's fault policy says
/// otherwise.  No error escapes to the tick driver.
///
/// # Example
///
/// ```rust,ignore
/// struct FleeSunlight { navigator: SteeringNavigator }
///
/// impl BehaviorPolicy for FleeSunlight {
///     fn priority(&self) -> f64 { 0.6 }
///     fn name(&self) -> &str { "flee-sunlight" }
///
///     fn guard(&self, ctx: &PolicyContext<'_>) -> PolicyResult<bool> {
///         Ok(ctx.position().y > 60.0)
///     }
///
///     fn start(&mut self, _ctx: &mut PolicyContext<'_>) -> PolicyResult<()> { Ok(()) }
///     fn update(&mut self, ctx: &mut PolicyContext<'_>) -> PolicyResult<()> {
///         let shade = ctx.position() + Vec3::new(0.0, -8.0, 0.0);
///         self.navigator.move_to(ctx.agent, shade, ctx.world)?;
///         Ok(())
///     }
///     fn stop(&mut self, ctx: &mut PolicyContext<'_>) -> PolicyResult<()> {
///         self.navigator.stop(ctx.agent, ctx.world);
///         Ok(())
///     }
/// }
/// ```
pub trait BehaviorPolicy: Send {
    /// Arbitration priority, static for the lifetime of the instance.
    /// Higher wins; ties are broken by registration order.
    ///
    /// Must be finite and non-negative — the scheduler rejects anything else
    /// at registration time.
    fn priority(&self) -> f64;

    /// Short identifier used in fault and switch logs.
    fn name(&self) -> &str {
        "policy"
    }

    /// Per-tick eligibility predicate.  Evaluated by the scheduler before
    /// any lifecycle call; a policy whose guard turns false is stopped and
    /// evicted within one tick.
    ///
    /// Default: always eligible.
    fn guard(&self, _ctx: &PolicyContext<'_>) -> PolicyResult<bool> {
        Ok(true)
    }

    /// Called once when the policy transitions INACTIVE → ACTIVE.
    fn start(&mut self, ctx: &mut PolicyContext<'_>) -> PolicyResult<()>;

    /// Called every tick while the policy is ACTIVE (primary or concurrent).
    fn update(&mut self, ctx: &mut PolicyContext<'_>) -> PolicyResult<()>;

    /// Called once when the policy transitions ACTIVE → INACTIVE.
    fn stop(&mut self, ctx: &mut PolicyContext<'_>) -> PolicyResult<()>;
}
