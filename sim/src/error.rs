use stakepoll_poll::PollError;
use stakepoll_types::StakepollError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("config error: {0}")]
    Config(String),

    #[error("step {index} ({action}) failed: {source}")]
    StepFailed {
        index: usize,
        action: &'static str,
        source: PollError,
    },

    #[error("step {index} ({action}) expected {expected} but succeeded")]
    UnexpectedSuccess {
        index: usize,
        action: &'static str,
        expected: String,
    },

    #[error("step {index} ({action}) expected {expected} but failed with {actual}")]
    WrongError {
        index: usize,
        action: &'static str,
        expected: String,
        actual: PollError,
    },

    #[error("poll error: {0}")]
    Poll(#[from] PollError),

    #[error("invalid input: {0}")]
    Input(#[from] StakepollError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("event export failed: {0}")]
    Export(String),
}
