//! PII detection and redaction for review bodies.

pub mod detector;
pub mod names;
pub mod redactor;

pub use detector::{detect_structured_pii, PiiCategory, PiiFindings, PiiMatch};
pub use names::{detect_names, NameDetection};
pub use redactor::{redact_pii, NAME_MARKER, REDACTION_MARKER};

/// Verdict from the PII classifier
#[derive(Debug, Clone)]
pub struct PiiVerdict {
    pub flagged: bool,
    /// Distinct category labels, e.g. "email", "names"
    pub categories: Vec<&'static str>,
    pub cleaned: String,
}

/// Combined pattern + name PII classifier
///
/// Pure and deterministic: the pattern set is fixed at construction and
/// classification performs no I/O.
#[derive(Debug, Clone, Copy)]
pub struct PiiFilter {
    name_detection: NameDetection,
}

impl PiiFilter {
    pub fn new(name_detection: NameDetection) -> Self {
        Self { name_detection }
    }

    /// Detect and redact PII in one pass
    pub fn classify(&self, text: &str) -> PiiVerdict {
        let mut findings = detect_structured_pii(text);
        detect_names(text, self.name_detection, &mut findings);

        let flagged = !findings.is_empty();
        let categories = findings.category_labels();
        let cleaned = redact_pii(text, &findings);

        PiiVerdict {
            flagged,
            categories,
            cleaned,
        }
    }
}

impl Default for PiiFilter {
    fn default() -> Self {
        Self::new(NameDetection::Conservative)
    }
}
