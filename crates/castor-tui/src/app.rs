//! Terminal application state.
//!
//! Wraps the [`RoomEngine`] with what only the terminal needs: the default
//! server URL, a one-line status message and a redraw flag set by an engine
//! observer. [`App::execute`] maps parsed commands onto engine calls and
//! turns declined actions into status messages.

use std::{
    io,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use castor_core::{
    ClipboardContent, Environment, FileOffer, ParticipantId, RoomEngine, RoomView, Scheduler,
    Timer,
};

use crate::commands::{Command, HELP};

const NOT_IN_ROOM: &str = "Not in a room";

/// Actions for the runtime after handling input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Redraw the screen.
    Render,
    /// Exit the application.
    Quit,
    /// Read file metadata, then call [`App::file_inspected`].
    InspectFile {
        /// Path to inspect.
        path: PathBuf,
    },
}

/// Terminal client state around the engine.
pub struct App<E: Environment, S: Scheduler> {
    engine: RoomEngine<E, S>,
    server_url: String,
    status: Option<String>,
    dirty: Arc<AtomicBool>,
}

impl<E: Environment, S: Scheduler> App<E, S> {
    /// Wrap an engine. `server_url` is used by `/create` without argument.
    pub fn new(mut engine: RoomEngine<E, S>, server_url: impl Into<String>) -> Self {
        let dirty = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&dirty);
        engine.subscribe(Box::new(move |_: &RoomView| flag.store(true, Ordering::Relaxed)));

        Self { engine, server_url: server_url.into(), status: None, dirty }
    }

    /// Run one command.
    pub fn execute(&mut self, command: Command) -> Vec<AppAction> {
        match command {
            Command::Create { server } => {
                let server = server.unwrap_or_else(|| self.server_url.clone());
                let name = self.engine.local_name().to_string();
                match self.engine.create_room(&name, &server) {
                    Ok(code) => {
                        let mode = if self.engine.is_demo_mode() { "demo" } else { "manual" };
                        self.set_status(format!("Created room {code} ({mode})"));
                    },
                    Err(err) => self.report_error(&err),
                }
            },
            Command::Join { code } => {
                let name = self.engine.local_name().to_string();
                match self.engine.join_room(&code, &name) {
                    Ok(()) => self.clear_status(),
                    Err(err) => self.report_error(&err),
                }
            },
            Command::Name { name } => {
                if self.engine.set_local_name(&name) {
                    let name = self.engine.local_name().to_string();
                    self.set_status(format!("Name set to {name}"));
                } else {
                    self.set_status("Leave the room to change your name");
                }
            },
            Command::Leave => {
                if self.engine.leave_room() {
                    self.set_status("Left the room");
                } else {
                    self.set_status(NOT_IN_ROOM);
                }
            },
            Command::Mute => {
                let status = self.engine.toggle_mute().map(|muted| {
                    if muted { "Microphone muted" } else { "Microphone on" }
                });
                self.set_status(status.unwrap_or(NOT_IN_ROOM));
            },
            Command::Camera => {
                let status = self
                    .engine
                    .toggle_camera()
                    .map(|on| if on { "Camera on" } else { "Camera off" });
                self.set_status(status.unwrap_or(NOT_IN_ROOM));
            },
            Command::Share => {
                if self.engine.toggle_screen_share().is_some() {
                    self.clear_status();
                } else {
                    self.set_status(NOT_IN_ROOM);
                }
            },
            Command::Hand => {
                if self.engine.toggle_raise_hand().is_some() {
                    self.clear_status();
                } else {
                    self.set_status(NOT_IN_ROOM);
                }
            },
            Command::MuteParticipant { position } => {
                self.moderate(position, "mute", RoomEngine::mute_participant);
            },
            Command::Kick { position } => {
                self.moderate(position, "remove", RoomEngine::kick_participant);
            },
            Command::File { path } => {
                if !self.engine.room().is_connected {
                    self.set_status(NOT_IN_ROOM);
                    return vec![AppAction::Render];
                }
                return vec![AppAction::InspectFile { path: PathBuf::from(path) }];
            },
            Command::Clip { text } => {
                let content = text.map_or(ClipboardContent::Unavailable, ClipboardContent::Text);
                if self.engine.share_clipboard(content) {
                    self.clear_status();
                } else {
                    self.set_status(NOT_IN_ROOM);
                }
            },
            Command::Help => self.set_status(HELP),
            Command::Quit => return vec![AppAction::Quit],
            Command::Message { content } => {
                if !self.engine.send_local_message(&content) && !self.engine.room().is_connected {
                    self.set_status("Join a room to start chatting");
                }
            },
            Command::Unknown { input } => self.set_status(format!("Unknown command: {input}")),
            Command::InvalidArgs { command, error } => {
                self.set_status(format!("/{command}: {error}"));
            },
        }
        vec![AppAction::Render]
    }

    /// Complete a `/file` command with the result of reading metadata.
    pub fn file_inspected(&mut self, path: &Path, size: io::Result<u64>) {
        match size {
            Ok(byte_size) => {
                let file_name = path.file_name().map_or_else(
                    || path.display().to_string(),
                    |name| name.to_string_lossy().into_owned(),
                );
                if self.engine.share_file(&FileOffer { file_name, byte_size }) {
                    self.clear_status();
                } else {
                    self.set_status(NOT_IN_ROOM);
                }
            },
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "cannot read file");
                self.set_status(format!("Cannot read {}: {err}", path.display()));
            },
        }
    }

    /// Deliver a fired timer to the engine.
    pub fn handle_timer(&mut self, timer: Timer) {
        self.engine.handle_timer(timer);
    }

    /// Leave the room, if any, before exit.
    pub fn shutdown(&mut self) {
        self.engine.leave_room();
    }

    /// Current view.
    pub fn view(&self) -> RoomView {
        self.engine.view()
    }

    /// Status message, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Set the status message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
        self.mark_dirty();
    }

    /// Request a redraw.
    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Relaxed);
    }

    /// Whether a redraw is due. Clears the flag.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::Relaxed)
    }

    /// The engine.
    pub fn engine(&self) -> &RoomEngine<E, S> {
        &self.engine
    }

    /// Mutable engine.
    pub fn engine_mut(&mut self) -> &mut RoomEngine<E, S> {
        &mut self.engine
    }

    fn clear_status(&mut self) {
        self.status = None;
        self.mark_dirty();
    }

    fn report_error(&mut self, err: &castor_core::RoomError) {
        tracing::warn!(error = %err, "room command rejected");
        self.set_status(err.user_message());
    }

    fn participant_at(&self, position: usize) -> Option<(ParticipantId, String)> {
        let participant = self.engine.room().participants.at(position.checked_sub(1)?)?;
        Some((participant.id.clone(), participant.name.clone()))
    }

    fn moderate(
        &mut self,
        position: usize,
        verb: &str,
        action: fn(&mut RoomEngine<E, S>, &ParticipantId) -> bool,
    ) {
        if !self.engine.room().is_connected {
            self.set_status(NOT_IN_ROOM);
            return;
        }
        let Some((id, name)) = self.participant_at(position) else {
            self.set_status(format!("No participant #{position}"));
            return;
        };
        if action(&mut self.engine, &id) {
            self.clear_status();
        } else {
            self.set_status(format!("Cannot {verb} {name}"));
        }
    }
}
