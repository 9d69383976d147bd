use mob_core::Vec3;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("navigator configuration error: {0}")]
    Config(String),

    /// No valid step among the direct candidate and the eight probe
    /// alternates.  Recoverable: velocity and destination are left
    /// untouched so the move can be retried on a later call.
    #[error("navigation blocked from {from} toward {target}")]
    Blocked { from: Vec3, target: Vec3 },
}

pub type NavResult<T> = Result<T, NavError>;
