//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ConnectionId validation error
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,

    /// ConnectionId too long error
    #[error("ConnectionId cannot exceed {max} characters (got {actual})")]
    ConnectionIdTooLong { max: usize, actual: usize },

    /// Username validation error
    #[error("Username cannot be empty")]
    UsernameEmpty,

    /// Username too long error
    #[error("Username cannot exceed {max} characters (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    /// RoomName validation error
    #[error("RoomName cannot be empty")]
    RoomNameEmpty,

    /// RoomName too long error
    #[error("RoomName cannot exceed {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    /// MessageBody validation error
    #[error("MessageBody cannot be empty")]
    MessageBodyEmpty,

    /// MessageBody too long error
    #[error("MessageBody cannot exceed {max} characters (got {actual})")]
    MessageBodyTooLong { max: usize, actual: usize },
}

/// Errors reported by the external history store.
///
/// Never fatal to the core: a failed save or read is logged and live
/// delivery continues.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// The store rejected or could not complete the operation
    #[error("history store unavailable: {0}")]
    Unavailable(String),
}
