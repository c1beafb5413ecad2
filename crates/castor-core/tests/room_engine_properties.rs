//! Property-based tests for room codes, the roster and file sizes.

use castor_core::{
    Participant, ParticipantId, ROOM_CODE_LEN, Role, RoomCode, RoomError, Roster, escape_html,
    format_file_size,
};
use castor_harness::{InvariantRegistry, SimDriver};
use proptest::prelude::*;

proptest! {
    /// Any six characters (after trimming) are a valid code, upper-cased.
    #[test]
    fn six_char_codes_parse(code in "[a-zA-Z0-9]{6}", pad in " {0,3}") {
        let input = format!("{pad}{code}{pad}");
        let parsed = RoomCode::parse(&input).unwrap();
        prop_assert_eq!(parsed.as_str(), code.to_uppercase());
    }

    /// Anything else is rejected with its normalized length.
    #[test]
    fn other_lengths_are_rejected(code in "[A-Z0-9]{0,12}") {
        prop_assume!(code.len() != ROOM_CODE_LEN);
        let err = RoomCode::parse(&code).unwrap_err();
        prop_assert_eq!(err, RoomError::InvalidRoomCode { code: code.clone(), length: code.len() });
    }

    /// Joining with a rejected code leaves the engine untouched.
    #[test]
    fn rejected_join_changes_nothing(seed in any::<u64>(), code in "[A-Z0-9]{0,5}") {
        let mut driver = SimDriver::new(seed).with_invariants(InvariantRegistry::standard());
        let before = driver.engine().view();

        prop_assert!(driver.engine_mut().join_room(&code, "Ada").is_err());
        prop_assert_eq!(driver.engine().view(), before);
        prop_assert_eq!(driver.engine().scheduler().pending(), 0);
    }

    /// Adding the same id any number of times keeps one entry, the first.
    #[test]
    fn roster_add_is_idempotent(names in prop::collection::vec("[a-z]{1,8}", 1..10)) {
        let mut roster = Roster::new();
        let id = ParticipantId::new("same");
        for name in &names {
            roster.add(Participant::new(id.clone(), name.as_str(), Role::Member));
        }
        prop_assert_eq!(roster.len(), 1);
        prop_assert_eq!(&roster.get(&id).unwrap().name, &names[0]);
    }

    /// Sizes render as a number and one known unit.
    #[test]
    fn file_size_has_number_and_unit(bytes in any::<u64>()) {
        let formatted = format_file_size(bytes);
        let (number, unit) = formatted.split_once(' ').unwrap();
        prop_assert!(["Bytes", "KB", "MB", "GB"].contains(&unit));
        let value: f64 = number.parse().unwrap();
        prop_assert!(value >= 0.0);
        if unit != "GB" {
            prop_assert!(value <= 1024.0);
        }
    }

    /// Escaped text contains no raw markup characters.
    #[test]
    fn escaped_text_has_no_markup(text in ".*") {
        let escaped = escape_html(&text);
        prop_assert!(!escaped.contains(['<', '>', '"', '\'']));
    }
}
