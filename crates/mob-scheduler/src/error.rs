use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Invalid construction or registration parameters.  Raised fail-fast:
    /// a scheduler (or registered policy) that passed validation is usable.
    #[error("scheduler configuration error: {0}")]
    Config(String),
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
