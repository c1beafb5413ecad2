//! Castor room simulation core
//!
//! Pure state machines for a mock video-conferencing room: roster, chat and
//! a timer-driven presence simulator that fakes other participants. No I/O:
//! time and randomness come from an [`Environment`], delays from a
//! [`Scheduler`], so the same code runs in the terminal client and under a
//! deterministic virtual clock in tests.
//!
//! # Components
//!
//! - [`RoomEngine`]: entry point for UI commands and fired timers
//! - [`RoomState`] / [`Roster`]: room code, connection flag, participants
//! - [`ChatLog`]: chat messages and system notices
//! - [`PresenceSimulator`]: demo-mode state machine
//! - [`RoomView`]: render-ready projection pushed to [`RoomObserver`]s

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod chat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod participant;
pub mod presence;
pub mod room;
pub mod schedule;
pub mod view;

pub use chat::{ChatLog, ChatMessage, NoticeKind, SystemNotice};
pub use config::{DemoConfig, EngineConfig};
pub use engine::{ClipboardContent, FileOffer, RoomEngine, RoomObserver};
pub use env::Environment;
pub use error::RoomError;
pub use participant::{Participant, ParticipantId, Role};
pub use presence::{PresencePhase, PresenceSimulator, SyntheticLine};
pub use room::{ROOM_CODE_LEN, RoomCode, RoomState, Roster};
pub use schedule::{Scheduler, Timer, TimerId, TimerTask};
pub use view::{
    CameraTile, ChatRow, NoticeRow, ParticipantRow, ParticipantStatus, RoomView, ScreenShareView,
    clipboard_preview, escape_html, format_clock, format_file_size,
};
