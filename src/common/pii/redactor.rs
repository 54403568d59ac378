use super::detector::{PiiCategory, PiiFindings, PiiMatch};

/// Marker that replaces pattern-matched PII in cleaned text
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Marker that replaces detected person names
pub const NAME_MARKER: &str = "[NAME]";

/// Redact all findings from the text
///
/// Matches are replaced in reverse position order so earlier offsets stay
/// valid while splicing. When a match overlaps an already-replaced region
/// its end is clamped to that region's start, so the non-overlapped
/// remainder is still redacted rather than left in the clear.
pub fn redact_pii(text: &str, findings: &PiiFindings) -> String {
    if findings.is_empty() {
        return text.to_string();
    }

    let mut sorted: Vec<&PiiMatch> = findings.matches.iter().collect();
    sorted.sort_by(|a, b| b.start.cmp(&a.start));

    let mut result = text.to_string();
    let mut replaced_from = usize::MAX;

    for pii_match in sorted {
        let end = pii_match.end.min(replaced_from);
        if pii_match.start >= end {
            continue;
        }

        let marker = match pii_match.category {
            PiiCategory::Name => NAME_MARKER,
            _ => REDACTION_MARKER,
        };

        result.replace_range(pii_match.start..end, marker);
        replaced_from = pii_match.start;
    }

    result
}
