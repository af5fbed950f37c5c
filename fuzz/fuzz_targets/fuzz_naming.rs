#![no_main]

use arbitrary::Arbitrary;
use bboard_core::naming::{sanitize_name, sanitize_segments};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    proposed: &'a str,
    fallback: &'a str,
    siblings: Vec<&'a str>,
}

fuzz_target!(|input: Input<'_>| {
    if input.proposed.len() > 1024 || input.siblings.len() > 64 {
        return;
    }

    let cleaned = sanitize_segments(input.proposed);
    assert_eq!(sanitize_segments(&cleaned), cleaned, "sanitize_segments must be idempotent");
    assert!(!cleaned.starts_with('/') && !cleaned.ends_with('/'));
    assert!(!cleaned.contains("//"));

    let name = sanitize_name(input.proposed, input.fallback, input.siblings.iter().copied());
    assert!(!name.is_empty(), "sanitized names are never empty");
    assert!(
        !input.siblings.contains(&name.as_str()),
        "sanitized name {name:?} collides with a sibling"
    );
});
