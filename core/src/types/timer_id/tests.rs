use super::*;
use std::collections::HashSet;

#[test]
fn generated_ids_have_expected_shape() {
    for _ in 0..1000 {
        let id = TimerId::generate();
        assert_eq!(id.len(), TIMER_ID_LENGTH);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()), "bad id {id}");
    }
}

#[test]
fn generated_ids_differ() {
    let ids: HashSet<TimerId> = (0..1000).map(|_| TimerId::generate()).collect();
    // 1000 draws from 62^8 values; a repeat here means the generator is stuck.
    assert_eq!(ids.len(), 1000);
}

#[test]
fn generated_ids_parse_back() {
    let id = TimerId::generate();
    let parsed = TimerId::try_from(id.as_str()).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn timer_id_accepts_alphanumeric() {
    let id = TimerId::try_from("aZ09bY18").unwrap();
    assert_eq!(id.to_string(), "aZ09bY18");
}

#[test]
fn timer_id_rejects_wrong_length() {
    TimerId::try_from("").unwrap_err();
    TimerId::try_from("abc").unwrap_err();
    TimerId::try_from("abcdefghi").unwrap_err();
}

#[test]
fn timer_id_rejects_non_alphanumeric() {
    TimerId::try_from("abc-efgh").unwrap_err();
    TimerId::try_from("abc efgh").unwrap_err();
    TimerId::try_from("abcdéfgh").unwrap_err();
    TimerId::try_from("../../et").unwrap_err();
}
