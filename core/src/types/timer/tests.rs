use super::*;
use std::time::Duration;

#[test]
fn timer_round_trip() {
    let timers = [
        Timer::new("launch", 1_700_000_000),
        Timer::new("", 0),
        Timer::new("ünïcode ⏰", -5),
        Timer::new("with created", 1_800_000_000).created_at(UNIX_EPOCH + Duration::from_secs(42)),
    ];

    for timer in timers {
        let bytes = timer.encode().unwrap();
        assert_eq!(Timer::decode(&bytes).unwrap(), timer);
    }
}

#[test]
fn timer_encodes_stable_field_names() {
    let bytes = Timer::new("tea", 1234).encode().unwrap();
    assert_eq!(
        std::str::from_utf8(&bytes).unwrap(),
        r#"{"name":"tea","deadline":1234}"#
    );
}

#[test]
fn timer_decode_ignores_unknown_fields() {
    let timer = Timer::decode(br#"{"name":"x","deadline":5,"color":"red"}"#).unwrap();
    assert_eq!(timer, Timer::new("x", 5));
}

#[test]
fn timer_decode_defaults_missing_name() {
    let timer = Timer::decode(br#"{"deadline":5}"#).unwrap();
    assert_eq!(timer.name, "");
    assert_eq!(timer.created, None);
}

#[test]
fn timer_decode_rejects_malformed_data() {
    Timer::decode(br#"{"name":"x","dead"#).unwrap_err();
    Timer::decode(br#"{"name":"x"}"#).unwrap_err();
    Timer::decode(br#""launch""#).unwrap_err();
    Timer::decode(b"").unwrap_err();
}

#[test]
fn timer_remaining_saturates() {
    let now = UNIX_EPOCH + Duration::from_secs(1000);
    assert_eq!(Timer::new("a", 1060).remaining(now), 60);
    assert_eq!(Timer::new("b", 900).remaining(now), 0);
}
