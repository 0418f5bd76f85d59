//! PHI Scrubbing
//!
//! Pure, total text transform that replaces identifier-shaped substrings
//! with fixed placeholder tokens before anything reaches a log sink.
//!
//! ## Pattern precedence
//!
//! Patterns run in a fixed order: email, then phone, then national ID.
//! The order is unambiguous by construction. The phone pattern requires a
//! 3-3-4 digit grouping, so it can never consume a 3-2-4 ID span; the ID
//! pattern requires literal `-` separators, so it can never fire inside
//! already-redacted output. Running the looser phone pattern before the
//! stricter ID pattern therefore produces neither double-redaction nor
//! mis-redaction.
//!
//! The transform is one-way and idempotent: placeholder tokens contain no
//! digits or at-signs and are never themselves PHI-shaped.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.\-]+@[\w.\-]+\.\w+").expect("email pattern compiles"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b").expect("phone pattern compiles"));

static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").expect("id pattern compiles"));

/// Replace email, phone, and national-ID-shaped substrings with fixed
/// placeholder tokens. Deterministic and never fails.
pub fn scrub(text: &str) -> String {
    let scrubbed = EMAIL_RE.replace_all(text, "[EMAIL]");
    let scrubbed = PHONE_RE.replace_all(&scrubbed, "[PHONE]");
    let scrubbed = ID_RE.replace_all(&scrubbed, "[ID]");
    scrubbed.into_owned()
}
