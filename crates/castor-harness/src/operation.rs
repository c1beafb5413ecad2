//! User-level operations for generated command sequences.

use std::time::Duration;

/// One step a simulated user (or the clock) can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Create a room against `server` (blank or `auto` means demo).
    Create {
        /// Server URL field.
        server: String,
    },
    /// Join a room by code.
    Join {
        /// Raw code as typed.
        code: String,
    },
    /// Leave the current room.
    Leave,
    /// Rename the local user.
    Rename(String),
    /// Send a chat message.
    Send(String),
    /// Toggle the local microphone.
    ToggleMute,
    /// Toggle the local camera.
    ToggleCamera,
    /// Toggle local screen sharing.
    ToggleScreenShare,
    /// Toggle the raised hand.
    ToggleHand,
    /// Mute the n-th other participant (wrapping).
    MuteOther(usize),
    /// Kick the n-th other participant (wrapping).
    KickOther(usize),
    /// Share a file of the given size.
    ShareFile(u64),
    /// Share clipboard text.
    ShareClipboard(String),
    /// Let virtual time pass.
    Advance(Duration),
}
