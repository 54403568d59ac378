use regex::Regex;

/// Token that replaces a matched term in cleaned text
pub const MASK_TOKEN: &str = "****";

/// Base wordlist of terms that hold a review for moderation
const BASE_WORDLIST: &[&str] = &[
    "ass", "asshole", "bastard", "bitch", "bullshit", "crap", "damn", "dick",
    "fuck", "fucking", "hell", "piss", "prick", "shit", "shitty", "slut",
    "whore",
];

/// Domain-specific additions: accusation terms that need a human look
/// before they are published against a broker
const DOMAIN_WORDLIST: &[&str] = &[
    "scam", "fraud", "ponzi", "pyramid", "steal", "thief", "criminal",
];

/// Verdict from the profanity classifier
#[derive(Debug, Clone)]
pub struct ProfanityVerdict {
    pub flagged: bool,
    pub cleaned: String,
}

/// Word-boundary, case-insensitive wordlist matcher
///
/// Immutable once constructed; classification is a pure function of the
/// input text. Matching is word-boundary aware so unrelated words that
/// merely contain a banned term ("scampi", "assessment") pass through.
pub struct ProfanityFilter {
    pattern: Regex,
}

impl ProfanityFilter {
    pub fn new() -> Self {
        Self::with_extra_terms(&[])
    }

    /// Build a filter with site-specific terms appended to the base and
    /// domain wordlists
    pub fn with_extra_terms(extra: &[&str]) -> Self {
        let terms: Vec<String> = BASE_WORDLIST
            .iter()
            .chain(DOMAIN_WORDLIST.iter())
            .chain(extra.iter())
            .map(|term| regex::escape(term))
            .collect();

        let pattern = Regex::new(&format!(r"(?i)\b(?:{})\b", terms.join("|")))
            .expect("Profanity wordlist pattern should compile");

        Self { pattern }
    }

    /// Classify text, masking every matched term in the cleaned copy
    pub fn classify(&self, text: &str) -> ProfanityVerdict {
        if !self.pattern.is_match(text) {
            return ProfanityVerdict {
                flagged: false,
                cleaned: text.to_string(),
            };
        }

        ProfanityVerdict {
            flagged: true,
            cleaned: self.pattern.replace_all(text, MASK_TOKEN).into_owned(),
        }
    }
}

impl Default for ProfanityFilter {
    fn default() -> Self {
        Self::new()
    }
}
