use lazy_static::lazy_static;
use regex::Regex;

/// Category of PII that was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PiiCategory {
    Email,
    Phone,
    Ssn,
    CreditCard,
    Address,
    Name,
}

impl PiiCategory {
    /// Short label used in verdict categories and admin notes
    pub fn label(&self) -> &'static str {
        match self {
            PiiCategory::Email => "email",
            PiiCategory::Phone => "phone",
            PiiCategory::Ssn => "ssn",
            PiiCategory::CreditCard => "credit_card",
            PiiCategory::Address => "address",
            PiiCategory::Name => "names",
        }
    }
}

/// A detected piece of PII with its location
#[derive(Debug, Clone)]
pub struct PiiMatch {
    pub category: PiiCategory,
    pub value: String,
    pub start: usize,
    pub end: usize,
}

/// Collection of detected PII
#[derive(Debug, Default, Clone)]
pub struct PiiFindings {
    pub matches: Vec<PiiMatch>,
}

impl PiiFindings {
    pub fn new() -> Self {
        Self {
            matches: Vec::new(),
        }
    }

    pub fn add(&mut self, category: PiiCategory, value: String, start: usize, end: usize) {
        self.matches.push(PiiMatch {
            category,
            value,
            start,
            end,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn by_category(&self, category: PiiCategory) -> Vec<&PiiMatch> {
        self.matches
            .iter()
            .filter(|m| m.category == category)
            .collect()
    }

    /// Distinct category labels, in a stable order
    pub fn category_labels(&self) -> Vec<&'static str> {
        let mut labels: Vec<&'static str> =
            self.matches.iter().map(|m| m.category.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }
}

lazy_static! {
    // Email pattern - RFC 5322 simplified
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b"
    ).unwrap();

    // Phone - US style, optional country code and separators
    static ref PHONE_REGEX: Regex = Regex::new(
        r"(?:\+?1[-.\s]?)?\(?([0-9]{3})\)?[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})"
    ).unwrap();

    // Social Security Number - XXX-XX-XXXX
    static ref SSN_REGEX: Regex = Regex::new(
        r"\b\d{3}-\d{2}-\d{4}\b"
    ).unwrap();

    // Credit-card-shaped sequences: 13-16 digits, optionally grouped in 4s
    static ref CREDIT_CARD_REGEX: Regex = Regex::new(
        r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{1,4}\b"
    ).unwrap();

    // Street address: number + words + common suffix
    static ref ADDRESS_REGEX: Regex = Regex::new(
        r"(?i)\b\d{1,5}\s+(?:[A-Za-z]+\s+){0,3}(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Lane|Ln|Drive|Dr|Court|Ct|Place|Pl|Way)\b\.?"
    ).unwrap();
}

/// Detect structured PII in text using regex patterns
///
/// Person names are handled separately (see `names`); this covers the
/// pattern-shaped categories only. Credit cards are matched by shape,
/// not checksum, so test numbers and real ones are treated alike.
pub fn detect_structured_pii(text: &str) -> PiiFindings {
    let mut findings = PiiFindings::new();

    for mat in EMAIL_REGEX.find_iter(text) {
        findings.add(PiiCategory::Email, mat.as_str().to_string(), mat.start(), mat.end());
    }

    // Credit cards before phones: a 13+ digit run should not be carved up
    // into phone-shaped fragments
    for mat in CREDIT_CARD_REGEX.find_iter(text) {
        let digit_count = mat.as_str().chars().filter(|c| c.is_ascii_digit()).count();
        if (13..=16).contains(&digit_count) {
            findings.add(
                PiiCategory::CreditCard,
                mat.as_str().to_string(),
                mat.start(),
                mat.end(),
            );
        }
    }

    for mat in SSN_REGEX.find_iter(text) {
        findings.add(PiiCategory::Ssn, mat.as_str().to_string(), mat.start(), mat.end());
    }

    for mat in PHONE_REGEX.find_iter(text) {
        if overlaps_existing(&findings, mat.start(), mat.end()) {
            continue;
        }
        findings.add(PiiCategory::Phone, mat.as_str().to_string(), mat.start(), mat.end());
    }

    for mat in ADDRESS_REGEX.find_iter(text) {
        if overlaps_existing(&findings, mat.start(), mat.end()) {
            continue;
        }
        findings.add(PiiCategory::Address, mat.as_str().to_string(), mat.start(), mat.end());
    }

    findings
}

fn overlaps_existing(findings: &PiiFindings, start: usize, end: usize) -> bool {
    findings
        .matches
        .iter()
        .any(|m| start < m.end && end > m.start)
}
