use std::str::FromStr;

use pagesmith::domain::TurnRole;

#[test]
fn given_known_role_strings_then_they_parse() {
    assert_eq!(TurnRole::from_str("user").unwrap(), TurnRole::User);
    assert_eq!(TurnRole::from_str("assistant").unwrap(), TurnRole::Assistant);
    assert_eq!(TurnRole::from_str("system").unwrap(), TurnRole::System);
}

#[test]
fn given_unknown_role_string_then_parsing_fails() {
    assert!(TurnRole::from_str("robot").is_err());
    assert!(TurnRole::from_str("USER").is_err());
    assert!(TurnRole::from_str("").is_err());
}

#[test]
fn given_role_then_display_round_trips() {
    for role in [TurnRole::System, TurnRole::User, TurnRole::Assistant] {
        assert_eq!(TurnRole::from_str(&role.to_string()).unwrap(), role);
    }
}
