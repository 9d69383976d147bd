use mob_core::AgentHandle;
use mob_scheduler::SchedulerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("agent {0} is already registered")]
    DuplicateAgent(AgentHandle),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

pub type SimResult<T> = Result<T, SimError>;
