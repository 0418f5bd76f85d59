//! Heuristic Field Extraction
//!
//! Deterministic regex/lexicon extraction of medication name, dosage, and
//! administration time from a free-text span. Total: the worst case is a
//! mention with every field null. Used standalone and as the fallback
//! behind the generative extraction engine.
//!
//! Field order matters: dosage and clock-time spans are located first and
//! removed from the working text before the name search, so numeric and
//! time tokens can never be mistaken for a medication name.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::MedicationMention;

/// Quantity plus unit, e.g. "50mg", "2.5 ml"
static DOSAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+(\.\d+)?\s*(mg|g|mcg|ml|units|tablet|pill|cap)")
        .expect("dosage pattern compiles")
});

/// Explicit clock time, e.g. "4pm", "4:30 PM"
static CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2})(:(\d{2}))?\s*(am|pm)").expect("clock pattern compiles")
});

/// Canonical names checked before any positional guessing; order wins.
const KNOWN_DRUGS: [&str; 10] = [
    "Lisinopril",
    "Metformin",
    "Atorvastatin",
    "Aspirin",
    "Ibuprofen",
    "Warfarin",
    "Advil",
    "Tylenol",
    "Amoxicillin",
    "Paracetamol",
];

/// Verbs, articles, and prepositions that are never medication names
const STOP_WORDS: [&str; 20] = [
    "take",
    "give",
    "eat",
    "drink",
    "use",
    "apply",
    "medication",
    "medicine",
    "pill",
    "tablet",
    "capsule",
    "every",
    "at",
    "daily",
    "the",
    "a",
    "an",
    "for",
    "with",
    "in",
];

/// Extract medication fields from free text. Never fails.
pub fn extract_heuristic(text: &str) -> MedicationMention {
    let text = text.trim();
    let lower = text.to_lowercase();

    let dosage_match = DOSAGE_RE.find(text);
    let dosage = dosage_match.map(|m| m.as_str().to_lowercase());

    // Daypart keywords take priority over an explicit clock time
    let mut clock_range: Option<Range<usize>> = None;
    let time = if lower.contains("morning") {
        Some("8:00 AM".to_string())
    } else if lower.contains("night") || lower.contains("bed") {
        Some("9:00 PM".to_string())
    } else if lower.contains("lunch") || lower.contains("noon") {
        Some("1:00 PM".to_string())
    } else {
        CLOCK_RE.captures(text).map(|caps| {
            let whole = caps.get(0).expect("whole match");
            clock_range = Some(whole.range());
            normalize_clock(&caps)
        })
    };

    let name = find_name(
        text,
        &lower,
        dosage_match.map(|m| m.range()),
        clock_range,
    );

    MedicationMention { name, dosage, time }
}

/// Normalize a clock match to `H:MM AM|PM`, padding bare hours with ":00"
fn normalize_clock(caps: &regex::Captures<'_>) -> String {
    let hour = &caps[1];
    let minutes = caps.get(3).map_or("00", |m| m.as_str());
    let meridiem = caps[4].to_uppercase();
    format!("{hour}:{minutes} {meridiem}")
}

fn find_name(
    text: &str,
    lower: &str,
    dosage_range: Option<Range<usize>>,
    clock_range: Option<Range<usize>>,
) -> Option<String> {
    // Known-drug lexicon first, lexicon order wins
    for drug in KNOWN_DRUGS {
        if lower.contains(&drug.to_ascii_lowercase()) {
            return Some(drug.to_string());
        }
    }

    // Remove matched dosage/time spans so their tokens cannot surface as
    // name candidates
    let working = remove_ranges(text, [dosage_range, clock_range]);

    // First remaining capitalized word longer than 2 characters
    for word in working.split_whitespace() {
        let clean = word.trim_matches(|c| ".,!?".contains(c));
        if clean.chars().count() > 2
            && !is_stop_word(&clean.to_lowercase())
            && word.chars().next().is_some_and(char::is_uppercase)
        {
            return Some(clean.to_string());
        }
    }

    // Otherwise the first digit-free word longer than 3 characters
    for word in working.split_whitespace() {
        let clean = word.trim_matches(|c| ".,!?".contains(c));
        if clean.chars().count() > 3
            && !is_stop_word(&clean.to_lowercase())
            && !word.chars().any(|c| c.is_ascii_digit())
        {
            return Some(capitalize(clean));
        }
    }

    None
}

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Rebuild `text` with the given byte ranges cut out
fn remove_ranges(text: &str, ranges: [Option<Range<usize>>; 2]) -> String {
    let mut cuts: Vec<Range<usize>> = ranges.into_iter().flatten().collect();
    cuts.sort_by_key(|r| r.start);

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for cut in cuts {
        if cut.start > cursor {
            out.push_str(&text[cursor..cut.start]);
        }
        cursor = cursor.max(cut.end);
    }
    if cursor < text.len() {
        out.push_str(&text[cursor..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_all_three_fields() {
        let mention = extract_heuristic("Take 50mg metformin every morning");
        assert_eq!(mention.name.as_deref(), Some("Metformin"));
        assert_eq!(mention.dosage.as_deref(), Some("50mg"));
        assert_eq!(mention.time.as_deref(), Some("8:00 AM"));
    }

    #[test]
    fn normalizes_bare_hour() {
        let mention = extract_heuristic("Tylenol at 4pm");
        assert_eq!(mention.name.as_deref(), Some("Tylenol"));
        assert!(mention.dosage.is_none());
        assert_eq!(mention.time.as_deref(), Some("4:00 PM"));
    }

    #[test]
    fn keeps_explicit_minutes() {
        let mention = extract_heuristic("Tylenol at 4:30 pm");
        assert_eq!(mention.time.as_deref(), Some("4:30 PM"));
    }

    #[test]
    fn daypart_beats_clock_time() {
        let mention = extract_heuristic("Aspirin 81mg at bedtime, not before 7pm");
        assert_eq!(mention.time.as_deref(), Some("9:00 PM"));
    }

    #[test]
    fn maps_noon_to_one_pm() {
        let mention = extract_heuristic("Metformin with lunch");
        assert_eq!(mention.time.as_deref(), Some("1:00 PM"));
    }

    #[test]
    fn lexicon_order_wins_over_position() {
        // Both names present; Lisinopril precedes Warfarin in the lexicon
        let mention = extract_heuristic("warfarin then lisinopril");
        assert_eq!(mention.name.as_deref(), Some("Lisinopril"));
    }

    #[test]
    fn lexicon_returns_canonical_casing() {
        let mention = extract_heuristic("take METFORMIN now");
        assert_eq!(mention.name.as_deref(), Some("Metformin"));
    }

    #[test]
    fn capitalized_fallback_skips_stop_words() {
        let mention = extract_heuristic("Give Zestril 10mg at night");
        assert_eq!(mention.name.as_deref(), Some("Zestril"));
        assert_eq!(mention.dosage.as_deref(), Some("10mg"));
        assert_eq!(mention.time.as_deref(), Some("9:00 PM"));
    }

    #[test]
    fn lowercase_fallback_capitalizes() {
        let mention = extract_heuristic("take zestril every morning");
        assert_eq!(mention.name.as_deref(), Some("Zestril"));
    }

    #[test]
    fn dosage_tokens_never_become_names() {
        // With the dosage span removed nothing name-like remains
        let mention = extract_heuristic("take 500mg");
        assert!(mention.name.is_none());
        assert_eq!(mention.dosage.as_deref(), Some("500mg"));
    }

    #[test]
    fn clock_tokens_never_become_names() {
        let mention = extract_heuristic("at 4pm take lovastatin");
        assert_eq!(mention.name.as_deref(), Some("Lovastatin"));
        assert_eq!(mention.time.as_deref(), Some("4:00 PM"));
    }

    #[test]
    fn decimal_dosages_are_matched() {
        let mention = extract_heuristic("give 2.5 ml nightly");
        assert_eq!(mention.dosage.as_deref(), Some("2.5 ml"));
        assert_eq!(mention.time.as_deref(), Some("9:00 PM"));
    }

    #[test]
    fn empty_text_yields_all_null() {
        let mention = extract_heuristic("");
        assert!(mention.is_empty());
    }

    #[test]
    fn punctuation_is_stripped_from_names() {
        let mention = extract_heuristic("Take Zestril.");
        assert_eq!(mention.name.as_deref(), Some("Zestril"));
    }

    #[test]
    fn never_panics_on_arbitrary_text() {
        for text in ["???", "12345", "a b c", "ナイト", "\u{0} take"] {
            let _ = extract_heuristic(text);
        }
    }
}
