//! Generative Response Cleanup
//!
//! Models frequently wrap JSON answers in markdown code fences even when
//! told not to. Fence stripping runs before every JSON parse; parse
//! failures after stripping are hard failures handled by the caller.

/// Strip a surrounding markdown code fence, if present.
///
/// Handles both ```` ```json ```` and bare ```` ``` ```` markers. Inner
/// content is left untouched.
pub fn strip_fences(raw: &str) -> &str {
    let mut s = raw.trim();
    if let Some(rest) = s.strip_prefix("```json") {
        s = rest;
    } else if let Some(rest) = s.strip_prefix("```") {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fence() {
        let raw = "```json\n{\"name\": \"Aspirin\"}\n```";
        assert_eq!(strip_fences(raw), "{\"name\": \"Aspirin\"}");
    }

    #[test]
    fn strips_bare_fence() {
        let raw = "```\n{\"a\": 1}\n```";
        assert_eq!(strip_fences(raw), "{\"a\": 1}");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_fences("{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(strip_fences("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn inner_fences_are_preserved() {
        let raw = "```json\n{\"text\": \"use ``` in markdown\"}\n```";
        assert_eq!(strip_fences(raw), "{\"text\": \"use ``` in markdown\"}");
    }
}
