//! Chat history and system notices.
//!
//! Two append-only logs per room session: user chat ([`ChatMessage`]) and
//! informational lifecycle events ([`SystemNotice`]). Both are cleared when
//! the room is left. Content is stored raw; escaping is a render concern.

use serde::Serialize;

/// A chat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Display name of the author.
    pub author: String,
    /// Raw message text.
    pub content: String,
    /// Wall-clock seconds since the Unix epoch.
    pub sent_at: u64,
    /// Whether the local user wrote it.
    pub is_own: bool,
}

/// What a system notice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeKind {
    /// Local user created the room.
    RoomCreated,
    /// Local user joined an existing room.
    RoomJoined,
    /// Someone else arrived.
    ParticipantJoined,
    /// A moderator muted someone.
    ParticipantMuted,
    /// A moderator kicked someone.
    ParticipantRemoved,
    /// Local screen share started or stopped.
    ScreenShare,
    /// Local hand raised or lowered.
    HandRaise,
    /// A file was offered.
    FileShared,
    /// Clipboard text was shared, or reading it failed.
    Clipboard,
}

/// Informational event, rendered apart from chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemNotice {
    /// Category.
    pub kind: NoticeKind,
    /// Human-readable text.
    pub text: String,
    /// Wall-clock seconds since the Unix epoch.
    pub sent_at: u64,
}

/// Per-session chat and notice history.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    notices: Vec<SystemNotice>,
}

impl ChatLog {
    /// Create empty logs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chat message.
    pub fn post_message(
        &mut self,
        author: impl Into<String>,
        content: impl Into<String>,
        is_own: bool,
        sent_at: u64,
    ) {
        self.messages.push(ChatMessage {
            author: author.into(),
            content: content.into(),
            sent_at,
            is_own,
        });
    }

    /// Append a system notice.
    pub fn post_notice(&mut self, kind: NoticeKind, text: impl Into<String>, sent_at: u64) {
        self.notices.push(SystemNotice { kind, text: text.into(), sent_at });
    }

    /// Chat messages in arrival order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// System notices in arrival order.
    pub fn notices(&self) -> &[SystemNotice] {
        &self.notices
    }

    /// Whether both logs are empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.notices.is_empty()
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.notices.clear();
    }
}
