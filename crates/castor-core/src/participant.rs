//! Participant records.
//!
//! A [`Participant`] is one entry in the roster: the local user or a demo
//! participant injected by the presence simulator. Identity is the
//! [`ParticipantId`], fixed at creation.

use std::fmt;

use serde::Serialize;

use crate::env::Environment;

const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Opaque participant identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh 9-character base-36 identifier.
    pub fn generate<E: Environment>(env: &E) -> Self {
        let mut value = env.random_u64();
        let mut id = String::with_capacity(ID_LEN);
        for _ in 0..ID_LEN {
            let digit = (value % 36) as usize;
            id.push(char::from(ID_ALPHABET[digit]));
            value /= 36;
        }
        Self(id)
    }

    /// Identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Moderation role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    /// May mute and kick other participants.
    Moderator,
    /// Regular participant.
    Member,
}

/// A roster entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Stable identity.
    pub id: ParticipantId,
    /// Display name.
    pub name: String,
    /// Moderation role.
    pub role: Role,
    /// Microphone muted.
    pub is_muted: bool,
    /// Screen share active.
    pub is_sharing_screen: bool,
    /// Camera enabled.
    pub is_camera_on: bool,
    /// Hand raised.
    pub hand_raised: bool,
    /// Currently speaking.
    pub is_speaking: bool,
}

impl Participant {
    /// Create a participant with every status flag cleared.
    pub fn new(id: ParticipantId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            is_muted: false,
            is_sharing_screen: false,
            is_camera_on: false,
            hand_raised: false,
            is_speaking: false,
        }
    }

    /// Upper-cased first character of the name, used for avatars.
    pub fn initial(&self) -> char {
        self.name.chars().next().map_or('?', |c| c.to_uppercase().next().unwrap_or(c))
    }

    /// Whether this participant may moderate others.
    pub fn is_moderator(&self) -> bool {
        self.role == Role::Moderator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_participant_has_cleared_flags() {
        let p = Participant::new(ParticipantId::new("abc"), "Alice", Role::Member);
        assert!(!p.is_muted);
        assert!(!p.is_sharing_screen);
        assert!(!p.is_camera_on);
        assert!(!p.hand_raised);
        assert!(!p.is_speaking);
        assert!(!p.is_moderator());
    }

    #[test]
    fn initial_is_uppercased() {
        let p = Participant::new(ParticipantId::new("x"), "diana", Role::Member);
        assert_eq!(p.initial(), 'D');

        let unnamed = Participant::new(ParticipantId::new("y"), "", Role::Member);
        assert_eq!(unnamed.initial(), '?');
    }
}
