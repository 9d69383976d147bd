use mob_nav::NavError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("policy configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Nav(#[from] NavError),

    /// An error raised from inside a guard or lifecycle hook.  The scheduler
    /// catches these at its boundary and never lets them reach the driver.
    #[error("policy fault: {0}")]
    Fault(String),
}

pub type PolicyResult<T> = Result<T, PolicyError>;
