use oh_core::OhError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{got} student records supplied for a run configured with {expected} students")]
    StudentCountMismatch {
        expected: usize,
        got:      usize,
    },

    #[error(transparent)]
    Core(#[from] OhError),

    #[error("agent thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type SimResult<T> = Result<T, SimError>;
