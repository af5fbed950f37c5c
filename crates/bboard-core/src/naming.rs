#![forbid(unsafe_code)]

//! Name sanitization and collision resolution.
//!
//! Pure functions shared by the property display names and the graph's
//! slash-delimited path. Nothing here holds state, so every function is safe
//! to call from anywhere.
//!
//! # Invariants
//!
//! 1. `sanitize_segments` is idempotent:
//!    `sanitize_segments(&sanitize_segments(x)) == sanitize_segments(x)`.
//! 2. `sanitize_segments` output never starts or ends with `/`, never
//!    contains `//`, and no segment has leading or trailing whitespace.
//! 3. `sanitize_name` never returns an empty string and never returns a
//!    name contained in the sibling set.
//! 4. `sanitize_name` terminates for any finite sibling set: at most
//!    `siblings.len() + 1` suffixes are tried.

use ahash::AHashSet;

/// Name used when both the proposed name and the caller's fallback are blank.
pub const DEFAULT_FALLBACK_NAME: &str = "Property";

/// Text shown in place of an empty path.
pub const DEFAULT_PATH_PLACEHOLDER: &str = "\u{2014}";

/// Split on `/`, trim each segment, drop empty segments, rejoin with `/`.
///
/// ```
/// use bboard_core::naming::sanitize_segments;
///
/// assert_eq!(sanitize_segments("  a/ /b//c "), "a/b/c");
/// assert_eq!(sanitize_segments("///"), "");
/// ```
#[must_use]
pub fn sanitize_segments(text: &str) -> String {
    text.split('/')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Produce a non-empty display name that collides with none of `siblings`.
///
/// The proposed name is trimmed; if nothing is left, `fallback` (trimmed) is
/// used, and [`DEFAULT_FALLBACK_NAME`] if that is blank too. A colliding
/// candidate gets the smallest numeric suffix `1, 2, ...` that makes it free.
///
/// `siblings` must not contain the entity's own current name; callers renaming
/// an existing entity exclude it so that keeping a name is not a collision.
///
/// ```
/// use bboard_core::naming::sanitize_name;
///
/// assert_eq!(sanitize_name(" Speed ", "Float", ["Speed"]), "Speed1");
/// assert_eq!(sanitize_name("", "Float", ["Float", "Float1"]), "Float2");
/// ```
#[must_use]
pub fn sanitize_name<'a, I>(proposed: &str, fallback: &str, siblings: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let base = non_blank(proposed)
        .or_else(|| non_blank(fallback))
        .unwrap_or(DEFAULT_FALLBACK_NAME);

    let taken: AHashSet<&str> = siblings.into_iter().collect();
    if !taken.contains(base) {
        return base.to_owned();
    }

    // Pigeonhole: among taken.len() + 1 suffixes at least one is free.
    let mut suffix: usize = 1;
    loop {
        let candidate = format!("{base}{suffix}");
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Text to display for a path label.
///
/// Returns `placeholder` when the path is empty.
#[must_use]
pub fn format_path<'a>(path: &'a str, placeholder: &'a str) -> &'a str {
    if path.is_empty() { placeholder } else { path }
}

fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
