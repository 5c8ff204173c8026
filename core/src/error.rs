use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid box index")]
    InvalidIndex,
    #[error("The first box has already been opened")]
    AlreadyOpenedFirst,
    #[error("Open the first box before anything else")]
    NoFirstOpenYet,
    #[error("Cannot predict the box that was opened first")]
    PredictingRevealedContainer,
    #[error("Predict every closed box first, and only while a single box is open")]
    IncompleteOpenOrdering,
    #[error("This box is already open")]
    AlreadyOpen,
    #[error("Snapshot does not describe a reachable game")]
    InvalidSnapshot,
}

pub type Result<T> = core::result::Result<T, GameError>;
