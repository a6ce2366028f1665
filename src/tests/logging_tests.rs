use std::time::Duration;

use serde_json::json;

use crate::constants::LOG_BODY_PREVIEW_CHARS;
use crate::logging::{body_preview, format_duration, redact_credential, sanitize_log_message};

#[test]
fn redacts_key_query_parameter() {
    let redacted = redact_credential(
        "https://generativelanguage.googleapis.com/v1beta/models/m:generateContent?key=secret",
    );
    assert!(!redacted.contains("secret"));
    assert!(redacted.ends_with("key=***") || redacted.ends_with("key=%2A%2A%2A"));
}

#[test]
fn leaves_urls_without_key_untouched() {
    let url = "http://localhost:3000/api/gemini?alt=json";
    assert_eq!(redact_credential(url), url);
    assert_eq!(redact_credential("not a url"), "not a url");
}

#[test]
fn control_characters_are_replaced() {
    assert_eq!(sanitize_log_message("a\u{1b}[31mb"), "a?[31mb");
}

#[test]
fn durations_pick_a_readable_unit() {
    assert_eq!(format_duration(Duration::from_micros(250)), "250.0µs");
    assert_eq!(format_duration(Duration::from_millis(12)), "12.00ms");
    assert_eq!(format_duration(Duration::from_secs(3)), "3.00s");
}

#[test]
fn short_bodies_are_logged_whole() {
    let preview = body_preview(&json!({"contents": [{"parts": [{"text": "hi"}]}]}));
    assert!(preview.contains("\"text\": \"hi\""));
    assert!(!preview.contains("more chars"));
}

#[test]
fn long_bodies_are_cut_short() {
    let image = "A".repeat(LOG_BODY_PREVIEW_CHARS * 2);
    let preview = body_preview(&json!({"inlineData": {"data": image}}));
    assert!(preview.ends_with("more chars)"));
    assert!(preview.chars().count() < LOG_BODY_PREVIEW_CHARS + 40);
}
