use crate::SessionStatus;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("not found: {0}")]
    NotFound(&'static str),
    #[error("invalid input: {0}")]
    Invalid(&'static str),
    #[error("conflict: {0}")]
    Conflict(&'static str),
    /// A session operation was attempted from a state that does not allow it.
    #[error("cannot {action} a {from} session")]
    InvalidTransition {
        from: SessionStatus,
        action: &'static str,
    },
}
