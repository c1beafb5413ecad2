//! Event loop for the terminal client.
//!
//! A single task owns the [`App`] and selects over three sources: terminal
//! input, fired timers from the [`TokioScheduler`], and a redraw tick so
//! the clock-driven parts of the screen stay fresh. The engine is only
//! ever touched from this loop.

use std::{path::Path, time::Duration};

use castor_core::{EngineConfig, RoomEngine, Timer};
use tokio::sync::mpsc;

use crate::{
    App, AppAction, InputState, SystemEnv, TerminalDriver, TerminalError, TokioScheduler,
    commands::Command,
    terminal::TerminalEvent,
};

const REDRAW_TICK: Duration = Duration::from_millis(500);

/// Client startup settings, from the command line.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Display name. Blank means `You`.
    pub name: String,
    /// Server URL used by `/create`. Blank or `auto` runs demo mode.
    pub server: String,
    /// Room code to join at startup.
    pub join: Option<String>,
    /// Engine tuning.
    pub engine: EngineConfig,
}

/// Terminal client runtime.
pub struct Runtime {
    app: App<SystemEnv, TokioScheduler>,
    timers: mpsc::UnboundedReceiver<Timer>,
    input: InputState,
}

impl Runtime {
    /// Build the engine and apply startup settings.
    ///
    /// Must be called within a Tokio runtime.
    pub fn new(config: ClientConfig) -> Self {
        let (scheduler, timers) = TokioScheduler::new();
        let engine = RoomEngine::new(SystemEnv::new(), scheduler, config.engine);
        let mut app = App::new(engine, config.server);

        if !config.name.trim().is_empty() {
            app.execute(Command::Name { name: config.name });
        }
        if let Some(code) = config.join {
            app.execute(Command::Join { code });
        }

        Self { app, timers, input: InputState::new() }
    }

    /// Run until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal fails.
    pub async fn run(mut self) -> Result<(), TerminalError> {
        let mut terminal = TerminalDriver::new()?;
        tracing::info!("terminal client started");

        let result = self.event_loop(&mut terminal).await;

        self.app.shutdown();
        tracing::info!("terminal client stopped");
        result
    }

    async fn event_loop(&mut self, terminal: &mut TerminalDriver) -> Result<(), TerminalError> {
        self.render(terminal)?;

        loop {
            let actions = tokio::select! {
                biased;

                event = terminal.next_event() => match event? {
                    TerminalEvent::Key(key) => self.input.handle_key(key, &mut self.app),
                    TerminalEvent::Resize => vec![AppAction::Render],
                    TerminalEvent::Ignored => vec![],
                },

                Some(timer) = self.timers.recv() => {
                    self.app.handle_timer(timer);
                    vec![]
                },

                () = tokio::time::sleep(REDRAW_TICK) => vec![AppAction::Render],
            };

            if self.process_actions(actions).await {
                return Ok(());
            }
            if self.app.take_dirty() {
                self.render(terminal)?;
            }
        }
    }

    /// Returns `true` on quit.
    async fn process_actions(&mut self, actions: Vec<AppAction>) -> bool {
        for action in actions {
            match action {
                AppAction::Render => self.app.mark_dirty(),
                AppAction::Quit => return true,
                AppAction::InspectFile { path } => {
                    let size = inspect_file(&path).await;
                    self.app.file_inspected(&path, size);
                },
            }
        }
        false
    }

    fn render(&self, terminal: &mut TerminalDriver) -> Result<(), TerminalError> {
        terminal.render(&self.app.view(), &self.input, self.app.status())
    }
}

/// Size of a regular file.
async fn inspect_file(path: &Path) -> std::io::Result<u64> {
    let metadata = tokio::fs::metadata(path).await?;
    if metadata.is_dir() {
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, "is a directory"));
    }
    Ok(metadata.len())
}
