//! Render-ready view models.
//!
//! [`RoomView`] is a pure projection of engine state handed to observers
//! after every change. Rendering layers consume it without touching the
//! engine. Chat content stays raw here; HTML surfaces call [`escape_html`]
//! (or [`ChatRow::content_html`]) at render time.

use serde::Serialize;

use crate::{
    chat::{ChatLog, NoticeKind},
    participant::{Participant, ParticipantId},
    room::RoomState,
};

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const CLIPBOARD_PREVIEW_CHARS: usize = 50;
const YOU_SUFFIX: &str = " (You)";

/// Status shown next to a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParticipantStatus {
    /// Muted (takes precedence over speaking).
    Muted,
    /// Speaking.
    Speaking,
    /// Present and idle.
    Connected,
}

impl ParticipantStatus {
    fn of(participant: &Participant) -> Self {
        if participant.is_muted {
            Self::Muted
        } else if participant.is_speaking {
            Self::Speaking
        } else {
            Self::Connected
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Muted => "Muted",
            Self::Speaking => "Speaking",
            Self::Connected => "Connected",
        }
    }
}

/// One row of the participant list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantRow {
    /// Participant id, target for moderator actions.
    pub id: ParticipantId,
    /// Display name.
    pub name: String,
    /// Avatar letter.
    pub initial: char,
    /// Row belongs to the local user.
    pub is_you: bool,
    /// Status indicator.
    pub status: ParticipantStatus,
    /// Hand-raised indicator.
    pub hand_raised: bool,
    /// Mute/kick actions are offered for this row.
    pub can_moderate: bool,
}

/// One camera tile. Shown for the local user and anyone with camera on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CameraTile {
    /// Participant id.
    pub participant_id: ParticipantId,
    /// Name shown on the placeholder.
    pub name: String,
    /// Label under the tile, `(You)` appended for the local user.
    pub label: String,
    /// Tile belongs to the local user.
    pub is_you: bool,
    /// Show the muted icon.
    pub is_muted: bool,
}

/// One chat line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRow {
    /// Author display name.
    pub author: String,
    /// Raw message text.
    pub content: String,
    /// `HH:MM` (UTC).
    pub time: String,
    /// Written by the local user.
    pub is_own: bool,
}

impl ChatRow {
    /// Content escaped for insertion into HTML.
    pub fn content_html(&self) -> String {
        escape_html(&self.content)
    }
}

/// One system notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeRow {
    /// Category.
    pub kind: NoticeKind,
    /// Notice text.
    pub text: String,
    /// `HH:MM` (UTC).
    pub time: String,
}

/// Active screen share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenShareView {
    /// Owner label, e.g. `Alice (You)`.
    pub owner: String,
}

/// Snapshot of everything a front-end renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoomView {
    /// Room code. `None` when disconnected.
    pub code: Option<String>,
    /// Whether a session is active.
    pub is_connected: bool,
    /// Whether demo participants are simulated.
    pub demo_mode: bool,
    /// Display name of the local user.
    pub local_name: String,
    /// Roster size.
    pub participant_count: usize,
    /// Participant list in display order.
    pub participants: Vec<ParticipantRow>,
    /// Camera grid in display order.
    pub camera_tiles: Vec<CameraTile>,
    /// Chat history.
    pub chat: Vec<ChatRow>,
    /// System notices.
    pub notices: Vec<NoticeRow>,
    /// Screen share panel. `None` shows the camera grid.
    pub screen_share: Option<ScreenShareView>,
}

impl RoomView {
    /// Project engine state into a view.
    pub fn build(
        room: &RoomState,
        chat: &ChatLog,
        local_id: &ParticipantId,
        local_name: &str,
        demo_mode: bool,
    ) -> Self {
        let local = room.participants.get(local_id);
        let local_is_moderator = local.is_some_and(Participant::is_moderator);

        let participants = room
            .participants
            .iter()
            .map(|p| {
                let is_you = &p.id == local_id;
                ParticipantRow {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    initial: p.initial(),
                    is_you,
                    status: ParticipantStatus::of(p),
                    hand_raised: p.hand_raised,
                    can_moderate: local_is_moderator && !is_you,
                }
            })
            .collect();

        let camera_tiles = room
            .participants
            .iter()
            .filter(|p| p.is_camera_on || &p.id == local_id)
            .map(|p| {
                let is_you = &p.id == local_id;
                CameraTile {
                    participant_id: p.id.clone(),
                    name: p.name.clone(),
                    label: display_label(&p.name, is_you),
                    is_you,
                    is_muted: p.is_muted,
                }
            })
            .collect();

        let chat_rows = chat
            .messages()
            .iter()
            .map(|m| ChatRow {
                author: m.author.clone(),
                content: m.content.clone(),
                time: format_clock(m.sent_at),
                is_own: m.is_own,
            })
            .collect();

        let notices = chat
            .notices()
            .iter()
            .map(|n| NoticeRow { kind: n.kind, text: n.text.clone(), time: format_clock(n.sent_at) })
            .collect();

        let screen_share = local
            .filter(|p| p.is_sharing_screen)
            .map(|p| ScreenShareView { owner: display_label(&p.name, true) });

        Self {
            code: room.code.as_ref().map(ToString::to_string),
            is_connected: room.is_connected,
            demo_mode,
            local_name: local_name.to_string(),
            participant_count: room.participants.len(),
            participants,
            camera_tiles,
            chat: chat_rows,
            notices,
            screen_share,
        }
    }
}

fn display_label(name: &str, is_you: bool) -> String {
    if is_you { format!("{name}{YOU_SUFFIX}") } else { name.to_string() }
}

/// Human-readable byte size: `0 Bytes`, `1 KB`, `1.5 KB`, `1 MB`.
///
/// Values are rounded to two decimals without trailing zeros. Sizes beyond
/// the unit table are expressed in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = 0usize;
    while exponent + 1 < SIZE_UNITS.len() && bytes >= 1024u64.pow(exponent as u32 + 1) {
        exponent += 1;
    }

    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", SIZE_UNITS[exponent])
}

/// Escape text for insertion into HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// First 50 characters of shared clipboard text, `...` appended if cut.
pub fn clipboard_preview(text: &str) -> String {
    let mut preview: String = text.chars().take(CLIPBOARD_PREVIEW_CHARS).collect();
    if text.chars().count() > CLIPBOARD_PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

/// `HH:MM` of a Unix timestamp, in UTC.
pub fn format_clock(unix_secs: u64) -> String {
    let minutes_of_day = (unix_secs % 86_400) / 60;
    format!("{:02}:{:02}", minutes_of_day / 60, minutes_of_day % 60)
}
