//! Terminal client for the Castor mock conferencing room
//!
//! A thin shell over [`castor_core::RoomEngine`] that supplies real time,
//! OS randomness and Tokio timers, and renders the engine's
//! [`castor_core::RoomView`] with ratatui. All room behavior lives in the
//! core crate.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod app;
pub mod commands;
pub mod input;
pub mod runtime;
pub mod scheduler;
pub mod system_env;
pub mod terminal;
pub mod ui;

pub use app::{App, AppAction};
pub use input::{InputState, KeyInput};
pub use runtime::{ClientConfig, Runtime};
pub use scheduler::TokioScheduler;
pub use system_env::SystemEnv;
pub use terminal::{TerminalDriver, TerminalError};
