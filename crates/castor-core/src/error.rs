//! Error types for the room engine.
//!
//! Only user-visible failures are errors. Everything else (empty chat input,
//! unknown participant ids, duplicate adds) is declined silently and logged
//! at debug level.

use thiserror::Error;

/// Errors surfaced to the user by room lifecycle operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// Room code does not have exactly six characters after normalization.
    #[error("room code must be 6 characters (got {length}: {code:?})")]
    InvalidRoomCode {
        /// The normalized (trimmed, upper-cased) code
        code: String,
        /// Its length in characters
        length: usize,
    },

    /// A room session is already active; leave it first.
    #[error("already connected to room {code}")]
    AlreadyConnected {
        /// Code of the active room
        code: String,
    },
}

impl RoomError {
    /// Message shown to the user in the front-end status line.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidRoomCode { .. } => "Room code must be 6 characters",
            Self::AlreadyConnected { .. } => "Leave the current room first",
        }
    }
}
