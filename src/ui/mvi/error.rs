use thiserror::Error;

/// Errors surfaced by the state engine to its callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The engine's background loops have stopped.
    #[error("State engine has shut down")]
    ShutDown,

    /// The view-model's loops were started twice.
    #[error("State engine already started")]
    AlreadyStarted,
}
