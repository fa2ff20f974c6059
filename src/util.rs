//! Small utility functions shared across the crate

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Prefix used for generated panel ids
const ID_PREFIX: &str = "fp-";

/// Clamp a value into `[min, max]`
///
/// When `max < min` (degenerate range) the result collapses to `min`.
pub fn clamp(value: i32, min: i32, max: i32) -> i32 {
    value.min(max).max(min)
}

/// Normalize an arbitrary string into a lowercase dash-separated slug.
///
/// Runs of non-alphanumeric characters collapse into a single `-`, and
/// leading/trailing dashes are stripped. An input with no usable
/// characters yields `"panel"`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for ch in input.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "panel".to_string()
    } else {
        slug
    }
}

/// Generate a unique panel id.
///
/// Combines a wall-clock component with a process-wide counter so ids
/// stay unique within a session and collide across sessions only if
/// the host reuses them deliberately.
pub fn generate_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    format!("{}{:x}{:03x}", ID_PREFIX, millis, seq & 0xfff)
}
