use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConductorError {
    /// A message was sent before any session existed.
    #[error("no active session; start one first")]
    NoSession,

    /// Network failure, unexpected status or undecodable body. Also raised
    /// when a session expires again right after the one silent replay.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}
