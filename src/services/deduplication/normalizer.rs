//! Canonical comparison keys for lead identity fields.
//!
//! Every function here is pure, total and idempotent: applying it to its own
//! output returns the same value. Inputs are free text supplied by directories
//! and partners, so nothing here can fail; a field that cannot be turned into a
//! usable key normalizes to `None` and takes part in no comparison.
//!
//! The functions take `&str`. An absent field is handled at the call site with
//! `field.as_deref().and_then(normalize_email)`, which is what
//! [`NormalizedKeySet::from_lead`] does.

use crate::models::Lead;

/// Tokens dropped from firm names wherever they appear.
const FIRM_NOISE_WORDS: &[&str] = &["the", "of"];

/// Legal-entity suffix tokens dropped from firm names.
///
/// `p.c.` is listed through its punctuation-free form `pc`.
const FIRM_ENTITY_SUFFIXES: &[&str] = &["llc", "pllc", "pc", "inc", "ltd", "llp"];

/// Honorifics dropped from the front of person names.
const PERSON_HONORIFICS: &[&str] = &["mr", "mrs", "ms", "dr"];

/// Generational and professional suffixes dropped from the end of person names.
const PERSON_SUFFIXES: &[&str] = &["esq", "jr", "sr", "ii", "iii", "iv"];

/// URL prefixes stripped from websites.
const WEBSITE_PREFIXES: &[&str] = &["https://", "http://", "www."];

/// Normalizes an email address: trimmed and lower-cased.
///
/// # Example
///
/// ```rust
/// use leadmatch::services::deduplication::normalize_email;
///
/// assert_eq!(normalize_email("  Test@Example.COM "), Some("test@example.com".to_string()));
/// assert_eq!(normalize_email("   "), None);
/// ```
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_lowercase();
    (!normalized.is_empty()).then_some(normalized)
}

/// Normalizes a North-American phone number to exactly ten digits.
///
/// Every non-digit is dropped, and an eleven-digit number with a leading `1`
/// loses the country code. Anything that does not end up as ten digits is
/// unusable and yields `None`.
///
/// # Example
///
/// ```rust
/// use leadmatch::services::deduplication::normalize_phone;
///
/// assert_eq!(normalize_phone("+1 (202) 555-0100"), Some("2025550100".to_string()));
/// assert_eq!(normalize_phone("555-0100"), None);
/// ```
#[must_use]
pub fn normalize_phone(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    let national = if digits.len() == 11 && digits.starts_with('1') {
        &digits[1..]
    } else {
        digits.as_str()
    };
    (national.len() == 10).then(|| national.to_string())
}

/// Normalizes a firm name for comparison.
///
/// Lower-cases, removes punctuation (including `&`), drops the noise words
/// `the`/`of` and the legal-entity suffixes, and removes the phrase
/// `law firm`. A standalone `law` elsewhere ("elder law") is kept.
///
/// # Example
///
/// ```rust
/// use leadmatch::services::deduplication::normalize_firm_name;
///
/// assert_eq!(normalize_firm_name("Smith Law Firm LLC"), Some("smith".to_string()));
/// assert_eq!(
///     normalize_firm_name("Williams Elder Law PLLC"),
///     Some("williams elder law".to_string())
/// );
/// ```
#[must_use]
pub fn normalize_firm_name(name: &str) -> Option<String> {
    let cleaned = strip_punctuation(&name.to_lowercase());
    let mut tokens: Vec<&str> = Vec::new();

    for token in cleaned.split_whitespace() {
        if FIRM_NOISE_WORDS.contains(&token) || FIRM_ENTITY_SUFFIXES.contains(&token) {
            continue;
        }
        // "law firm" is removed as a phrase; the stack makes removal cascade
        // ("law law firm firm" leaves nothing behind).
        if token == "firm" && tokens.last() == Some(&"law") {
            tokens.pop();
            continue;
        }
        tokens.push(token);
    }

    join_tokens(&tokens)
}

/// Normalizes a person name for comparison.
///
/// Lower-cases, removes punctuation, then drops leading honorifics and
/// trailing suffixes.
///
/// # Example
///
/// ```rust
/// use leadmatch::services::deduplication::normalize_person_name;
///
/// assert_eq!(normalize_person_name("Mr. James Wilson III"), Some("james wilson".to_string()));
/// assert_eq!(normalize_person_name("Dr."), None);
/// ```
#[must_use]
pub fn normalize_person_name(name: &str) -> Option<String> {
    let cleaned = strip_punctuation(&name.to_lowercase());
    let all: Vec<&str> = cleaned.split_whitespace().collect();
    let mut tokens = all.as_slice();

    while let Some((first, rest)) = tokens.split_first() {
        if !PERSON_HONORIFICS.contains(first) {
            break;
        }
        tokens = rest;
    }
    while let Some((last, rest)) = tokens.split_last() {
        if !PERSON_SUFFIXES.contains(last) {
            break;
        }
        tokens = rest;
    }

    join_tokens(tokens)
}

/// Normalizes a website for comparison.
///
/// Lower-cases, strips `http://`, `https://` and `www.` prefixes, and removes
/// trailing slashes.
///
/// # Example
///
/// ```rust
/// use leadmatch::services::deduplication::normalize_website;
///
/// assert_eq!(normalize_website("https://www.AlphaLegal.com/"), Some("alphalegal.com".to_string()));
/// assert_eq!(normalize_website("https://"), None);
/// ```
#[must_use]
pub fn normalize_website(website: &str) -> Option<String> {
    let lowered = website.to_lowercase();
    let mut rest = lowered.trim();

    while let Some(stripped) = WEBSITE_PREFIXES
        .iter()
        .find_map(|prefix| rest.strip_prefix(prefix))
    {
        rest = stripped.trim();
    }

    let normalized = rest.trim_end_matches(|c: char| c == '/' || c.is_whitespace());
    (!normalized.is_empty()).then(|| normalized.to_string())
}

/// Removes every character that is neither alphanumeric nor whitespace.
fn strip_punctuation(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

fn join_tokens(tokens: &[&str]) -> Option<String> {
    (!tokens.is_empty()).then(|| tokens.join(" "))
}

/// Pair key for the firm + attorney signal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FirmAttorneyKey {
    /// Normalized firm name.
    pub firm: String,
    /// Normalized attorney name.
    pub attorney: String,
}

impl FirmAttorneyKey {
    /// Creates a pair key from already-normalized parts.
    #[must_use]
    pub fn new(firm: impl Into<String>, attorney: impl Into<String>) -> Self {
        Self {
            firm: firm.into(),
            attorney: attorney.into(),
        }
    }
}

/// The canonical forms of a lead's identity fields.
///
/// Derived on demand and never stored: it is purely a function of the lead's
/// current field values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedKeySet {
    /// Normalized attorney email.
    pub email: Option<String>,
    /// Normalized ten-digit phone.
    pub phone: Option<String>,
    /// Normalized firm website.
    pub website: Option<String>,
    /// Normalized firm name.
    pub firm: Option<String>,
    /// Normalized attorney name.
    pub attorney: Option<String>,
}

impl NormalizedKeySet {
    /// Computes the key set for a lead.
    #[must_use]
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            email: lead.attorney_email.as_deref().and_then(normalize_email),
            phone: lead.attorney_phone.as_deref().and_then(normalize_phone),
            website: lead.firm_website.as_deref().and_then(normalize_website),
            firm: lead.firm_name.as_deref().and_then(normalize_firm_name),
            attorney: lead.attorney_name.as_deref().and_then(normalize_person_name),
        }
    }

    /// Returns the firm + attorney pair key when both halves are usable.
    #[must_use]
    pub fn firm_attorney(&self) -> Option<FirmAttorneyKey> {
        match (&self.firm, &self.attorney) {
            (Some(firm), Some(attorney)) => Some(FirmAttorneyKey::new(firm, attorney)),
            _ => None,
        }
    }

    /// Returns true if at least one match signal is present.
    ///
    /// A firm name without an attorney is not a signal on its own.
    #[must_use]
    pub const fn has_signal(&self) -> bool {
        self.email.is_some()
            || self.phone.is_some()
            || self.website.is_some()
            || (self.firm.is_some() && self.attorney.is_some())
    }
}
