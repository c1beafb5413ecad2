//! Slash-command parsing.
//!
//! Input starting with `/` is a command; anything else is a chat message.
//! Parsing never fails: bad input becomes [`Command::Unknown`] or
//! [`Command::InvalidArgs`] so the caller can show a status message.

/// Parsed user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/create [server]`: create a room. No server uses the configured one.
    Create {
        /// Server URL override.
        server: Option<String>,
    },
    /// `/join CODE`: join a room by code.
    Join {
        /// Code as typed.
        code: String,
    },
    /// `/name NAME`: set the display name (only while disconnected).
    Name {
        /// New display name.
        name: String,
    },
    /// `/leave`: leave the current room.
    Leave,
    /// `/mute`: toggle the local microphone.
    Mute,
    /// `/camera`: toggle the local camera.
    Camera,
    /// `/share`: toggle screen sharing.
    Share,
    /// `/hand`: raise or lower the hand.
    Hand,
    /// `/mutep N`: mute the participant at roster position N (1-based).
    MuteParticipant {
        /// Roster position as displayed.
        position: usize,
    },
    /// `/kick N`: remove the participant at roster position N (1-based).
    Kick {
        /// Roster position as displayed.
        position: usize,
    },
    /// `/file PATH`: offer a file.
    File {
        /// Path as typed.
        path: String,
    },
    /// `/clip [TEXT]`: share clipboard text. Without text the terminal has
    /// no clipboard to read.
    Clip {
        /// Text to share.
        text: Option<String>,
    },
    /// `/help`: list commands.
    Help,
    /// `/quit`: exit.
    Quit,
    /// Plain chat message.
    Message {
        /// Message text, untrimmed.
        content: String,
    },
    /// Unrecognized `/command`.
    Unknown {
        /// Full input.
        input: String,
    },
    /// Known command with bad arguments.
    InvalidArgs {
        /// Command name without the slash.
        command: String,
        /// What was wrong.
        error: String,
    },
}

/// One-line command summary for the status bar.
pub const HELP: &str = "/create [server] /join CODE /name NAME /leave /mute /camera /share \
                        /hand /mutep N /kick N /file PATH /clip TEXT /quit";

/// Parse one line of input.
pub fn parse(input: &str) -> Command {
    let Some(rest) = input.strip_prefix('/') else {
        return Command::Message { content: input.to_string() };
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };
    let arg = (!args.is_empty()).then(|| args.to_string());

    match name {
        "create" => Command::Create { server: arg },
        "join" => match arg {
            Some(code) => Command::Join { code },
            None => invalid(name, "missing room code"),
        },
        "name" => match arg {
            Some(name) => Command::Name { name },
            None => invalid("name", "missing name"),
        },
        "leave" => Command::Leave,
        "mute" => Command::Mute,
        "camera" => Command::Camera,
        "share" => Command::Share,
        "hand" => Command::Hand,
        "mutep" => match parse_position(args) {
            Ok(position) => Command::MuteParticipant { position },
            Err(error) => invalid(name, error),
        },
        "kick" => match parse_position(args) {
            Ok(position) => Command::Kick { position },
            Err(error) => invalid(name, error),
        },
        "file" => match arg {
            Some(path) => Command::File { path },
            None => invalid(name, "missing path"),
        },
        "clip" => Command::Clip { text: arg },
        "help" => Command::Help,
        "quit" | "q" => Command::Quit,
        _ => Command::Unknown { input: input.to_string() },
    }
}

fn parse_position(args: &str) -> Result<usize, &'static str> {
    if args.is_empty() {
        return Err("missing participant number");
    }
    match args.parse::<usize>() {
        Ok(0) | Err(_) => Err("participant number must be 1 or more"),
        Ok(position) => Ok(position),
    }
}

fn invalid(command: &str, error: &str) -> Command {
    Command::InvalidArgs { command: command.to_string(), error: error.to_string() }
}
