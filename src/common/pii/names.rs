use lazy_static::lazy_static;
use regex::Regex;

use super::detector::{PiiCategory, PiiFindings};

/// How eagerly to treat capitalized text as a person name
///
/// Name extraction is heuristic, not NLP-grade: its false-positive rate on
/// ordinary capitalized words is real, which is why the level is a knob
/// rather than a guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameDetection {
    /// Only names introduced by an explicit frame: an honorific
    /// ("Mr. Smith") or a self-introduction ("my name is Jane Doe")
    Conservative,
    /// Also treat mid-sentence Title Case runs of two or more words as
    /// names ("ask for John Smith at the desk")
    Aggressive,
}

lazy_static! {
    // Honorific followed by one or two capitalized words
    static ref HONORIFIC_NAME_REGEX: Regex = Regex::new(
        r"\b(?:Mr|Mrs|Ms|Dr|Prof)\.?\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+)?"
    ).unwrap();

    // Self-introduction frames; the capture group is the name itself
    static ref INTRODUCTION_REGEX: Regex = Regex::new(
        r"\b(?:[Mm]y name is|[Ii] am|[Ii]'m)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)"
    ).unwrap();

    // Two or more consecutive Title Case words
    static ref TITLE_CASE_RUN_REGEX: Regex = Regex::new(
        r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+\b"
    ).unwrap();
}

/// Detect person names and append them to `findings`
///
/// Matches that overlap something already found (an email, an address) are
/// dropped; the structured match wins.
pub fn detect_names(text: &str, level: NameDetection, findings: &mut PiiFindings) {
    let mut spans: Vec<(usize, usize, String)> = Vec::new();

    for mat in HONORIFIC_NAME_REGEX.find_iter(text) {
        spans.push((mat.start(), mat.end(), mat.as_str().to_string()));
    }

    for caps in INTRODUCTION_REGEX.captures_iter(text) {
        if let Some(name) = caps.get(1) {
            spans.push((name.start(), name.end(), name.as_str().to_string()));
        }
    }

    if level == NameDetection::Aggressive {
        for mat in TITLE_CASE_RUN_REGEX.find_iter(text) {
            if at_sentence_start(text, mat.start()) {
                continue;
            }
            spans.push((mat.start(), mat.end(), mat.as_str().to_string()));
        }
    }

    spans.sort_by_key(|(start, _, _)| *start);

    for (start, end, value) in spans {
        let overlaps = findings
            .matches
            .iter()
            .any(|m| start < m.end && end > m.start);
        if !overlaps {
            findings.add(PiiCategory::Name, value, start, end);
        }
    }
}

/// A Title Case word at the start of the text or right after sentence
/// punctuation is most likely ordinary capitalization, not a name
fn at_sentence_start(text: &str, offset: usize) -> bool {
    let preceding = text[..offset]
        .chars()
        .rev()
        .find(|c| !c.is_whitespace());

    match preceding {
        None => true,
        Some(c) => matches!(c, '.' | '!' | '?'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names_in(text: &str, level: NameDetection) -> Vec<String> {
        let mut findings = PiiFindings::new();
        detect_names(text, level, &mut findings);
        findings
            .by_category(PiiCategory::Name)
            .into_iter()
            .map(|m| m.value.clone())
            .collect()
    }

    #[test]
    fn test_honorific_name() {
        let names = names_in(
            "I spoke with Mr. Smith about the withdrawal",
            NameDetection::Conservative,
        );
        assert_eq!(names, vec!["Mr. Smith"]);
    }

    #[test]
    fn test_introduction_frame() {
        let names = names_in(
            "my name is Jane Doe and I lost money here",
            NameDetection::Conservative,
        );
        assert_eq!(names, vec!["Jane Doe"]);
    }

    #[test]
    fn test_conservative_skips_title_case_runs() {
        let names = names_in(
            "their account manager John Smith never replied",
            NameDetection::Conservative,
        );
        assert!(names.is_empty());
    }

    #[test]
    fn test_aggressive_takes_title_case_runs() {
        let names = names_in(
            "their account manager John Smith never replied",
            NameDetection::Aggressive,
        );
        assert_eq!(names, vec!["John Smith"]);
    }

    #[test]
    fn test_sentence_start_not_a_name() {
        let names = names_in(
            "Great Platform overall. Good Support too",
            NameDetection::Aggressive,
        );
        assert!(names.is_empty());
    }

    #[test]
    fn test_no_names_in_plain_text() {
        let names = names_in(
            "the spreads widened during news events",
            NameDetection::Aggressive,
        );
        assert!(names.is_empty());
    }
}
