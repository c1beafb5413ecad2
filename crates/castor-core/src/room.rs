//! Room state and participant registry.
//!
//! [`RoomState`] holds the room code, connection flag and the ordered
//! [`Roster`]. Roster order is insertion order and doubles as the display
//! order for the participant list and camera tiles.

use std::fmt;

use serde::Serialize;

use crate::{
    env::Environment,
    error::RoomError,
    participant::{Participant, ParticipantId},
};

/// Number of characters in a room code.
pub const ROOM_CODE_LEN: usize = 6;

const CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Six-character room code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Generate a code with each character drawn uniformly from `[A-Z0-9]`.
    ///
    /// No uniqueness check: there is only ever one room.
    pub fn generate<E: Environment>(env: &E) -> Self {
        let code = (0..ROOM_CODE_LEN)
            .map(|_| char::from(CODE_ALPHABET[env.random_index(CODE_ALPHABET.len())]))
            .collect();
        Self(code)
    }

    /// Normalize user input (trim, upper-case) and check its length.
    ///
    /// Any six characters are accepted; there is no server to validate
    /// against.
    pub fn parse(input: &str) -> Result<Self, RoomError> {
        let code = input.trim().to_uppercase();
        let length = code.chars().count();
        if length != ROOM_CODE_LEN {
            return Err(RoomError::InvalidRoomCode { code, length });
        }
        Ok(Self(code))
    }

    /// Code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered participant list, unique by id.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a participant. Returns `false` (no-op) if the id is present.
    pub fn add(&mut self, participant: Participant) -> bool {
        if self.contains(&participant.id) {
            return false;
        }
        self.participants.push(participant);
        true
    }

    /// Remove by id. Returns the removed record, `None` if absent.
    pub fn remove(&mut self, id: &ParticipantId) -> Option<Participant> {
        let index = self.participants.iter().position(|p| &p.id == id)?;
        Some(self.participants.remove(index))
    }

    /// Whether a participant with this id is present.
    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.participants.iter().any(|p| &p.id == id)
    }

    /// Look up by id.
    pub fn get(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    /// Look up by id for mutation.
    pub fn get_mut(&mut self, id: &ParticipantId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| &p.id == id)
    }

    /// Participant at a display position.
    pub fn at(&self, index: usize) -> Option<&Participant> {
        self.participants.get(index)
    }

    /// Participants in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    /// Everyone except `local`.
    pub fn others<'a>(&'a self, local: &'a ParticipantId) -> Vec<&'a Participant> {
        self.participants.iter().filter(|p| &p.id != local).collect()
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Drop every participant.
    pub fn clear(&mut self) {
        self.participants.clear();
    }
}

/// Room session state.
///
/// # Invariants
///
/// - `code.is_some() == is_connected`
/// - While connected, the local user's id is in `participants`
#[derive(Debug, Clone, Default)]
pub struct RoomState {
    /// Active room code. `None` when disconnected.
    pub code: Option<RoomCode>,
    /// Ordered participant registry.
    pub participants: Roster,
    /// Whether a session is active.
    pub is_connected: bool,
}

impl RoomState {
    /// Create disconnected state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a session with the local user as first participant.
    pub fn connect(&mut self, code: RoomCode, local: Participant) {
        self.participants.clear();
        self.participants.add(local);
        self.code = Some(code);
        self.is_connected = true;
    }

    /// Leave the session and drop the roster.
    pub fn disconnect(&mut self) {
        self.participants.clear();
        self.code = None;
        self.is_connected = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::Role;

    fn member(id: &str, name: &str) -> Participant {
        Participant::new(ParticipantId::new(id), name, Role::Member)
    }

    #[test]
    fn parse_normalizes_input() {
        let code = RoomCode::parse("  ab12cd ").expect("valid code");
        assert_eq!(code.as_str(), "AB12CD");
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert_eq!(
            RoomCode::parse("AB12"),
            Err(RoomError::InvalidRoomCode { code: "AB12".to_string(), length: 4 })
        );
        assert!(RoomCode::parse("ABCDEFG").is_err());
        assert!(RoomCode::parse("      ").is_err());
    }

    #[test]
    fn parse_accepts_any_six_characters() {
        assert!(RoomCode::parse("ab-1_2").is_ok());
    }

    #[test]
    fn roster_add_is_idempotent() {
        let mut roster = Roster::new();
        assert!(roster.add(member("a", "Alice")));
        assert!(!roster.add(member("a", "Alice again")));

        assert_eq!(roster.len(), 1);
        assert_eq!(roster.get(&ParticipantId::new("a")).map(|p| p.name.as_str()), Some("Alice"));
    }

    #[test]
    fn roster_preserves_insertion_order() {
        let mut roster = Roster::new();
        roster.add(member("c", "Charlie"));
        roster.add(member("a", "Alice"));
        roster.add(member("b", "Bob"));

        let names: Vec<_> = roster.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Charlie", "Alice", "Bob"]);
    }

    #[test]
    fn roster_remove_absent_is_noop() {
        let mut roster = Roster::new();
        roster.add(member("a", "Alice"));

        assert!(roster.remove(&ParticipantId::new("zzz")).is_none());
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn others_excludes_local() {
        let mut roster = Roster::new();
        roster.add(member("me", "You"));
        roster.add(member("a", "Alice"));

        let local = ParticipantId::new("me");
        let others = roster.others(&local);
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].name, "Alice");
    }

    #[test]
    fn connect_and_disconnect_keep_code_and_flag_in_step() {
        let mut state = RoomState::new();
        let code = RoomCode::parse("ROOM01").expect("valid code");

        state.connect(code, member("me", "You"));
        assert!(state.is_connected);
        assert!(state.code.is_some());
        assert_eq!(state.participants.len(), 1);

        state.disconnect();
        assert!(!state.is_connected);
        assert!(state.code.is_none());
        assert!(state.participants.is_empty());
    }
}
