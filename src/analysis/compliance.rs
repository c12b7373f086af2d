// src/analysis/compliance.rs
use crate::generators::charset::SYMBOLS;
use crate::models::{ComplianceBadges, GenerationOptions};

/// Substrings treated as sequential runs, matched case-insensitively.
pub const SEQUENTIAL_PATTERNS: &[&str] = &["abc", "012", "bcd", "123", "xyz", "789", "123456"];

pub fn has_sequential(password: &str) -> bool {
    let lowered = password.to_lowercase();
    SEQUENTIAL_PATTERNS
        .iter()
        .any(|pattern| lowered.contains(pattern))
}

/// Evaluate the badges for `password`.
///
/// The badges describe what the string actually contains. `_options` is
/// what the caller asked for and is not consulted.
pub fn check_compliance(password: &str, _options: &GenerationOptions) -> ComplianceBadges {
    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());
    let has_numbers = password.chars().any(|c| c.is_ascii_digit());
    let has_symbols = password.chars().any(|c| SYMBOLS.contains(c));

    let length = password.chars().count();
    let classes = [has_uppercase, has_lowercase, has_numbers, has_symbols]
        .iter()
        .filter(|present| **present)
        .count();

    ComplianceBadges {
        nist: length >= 8 && !has_sequential(password),
        owasp: has_uppercase && has_lowercase && has_numbers && has_symbols,
        strong: length >= 12 && (has_uppercase || has_lowercase) && has_numbers,
        complex: classes >= 3,
    }
}
