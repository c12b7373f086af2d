// src/generators/charset.rs
//! Character categories and charset construction.

use super::{GeneratorError, Result};
use crate::models::GenerationOptions;

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Uppercase without I, L and O.
pub const UPPERCASE_NO_CONFUSING: &str = "ABCDEFGHJKMNPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
/// Lowercase without i, l and o.
pub const LOWERCASE_NO_CONFUSING: &str = "abcdefghjkmnpqrstuvwxyz";
pub const NUMBERS: &str = "0123456789";
/// Digits without 0 and 1.
pub const NUMBERS_NO_CONFUSING: &str = "23456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";
/// Symbols accepted by most web forms.
pub const SYMBOLS_SAFE: &str = "!@#$%^&*_+-=";

/// The alphabets selected by `options`, in the fixed order
/// uppercase, lowercase, numbers, symbols.
fn categories(options: &GenerationOptions) -> impl Iterator<Item = &'static str> {
    let pick = |enabled: bool, reduced: bool, full: &'static str, short: &'static str| {
        enabled.then_some(if reduced { short } else { full })
    };

    [
        pick(options.uppercase, options.exclude_confusing, UPPERCASE, UPPERCASE_NO_CONFUSING),
        pick(options.lowercase, options.exclude_confusing, LOWERCASE, LOWERCASE_NO_CONFUSING),
        pick(options.numbers, options.exclude_confusing, NUMBERS, NUMBERS_NO_CONFUSING),
        pick(options.symbols, options.exclude_unsafe_symbols, SYMBOLS, SYMBOLS_SAFE),
    ]
    .into_iter()
    .flatten()
}

/// Ordered set of characters eligible for random selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
    chars: Vec<char>,
}

impl Charset {
    pub fn build(options: &GenerationOptions) -> Result<Self> {
        let chars: Vec<char> = categories(options).flat_map(str::chars).collect();

        if chars.is_empty() {
            return Err(GeneratorError::Configuration(
                "At least one character type must be selected".to_string(),
            ));
        }

        Ok(Self { chars })
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}

/// Size of the charset `options` would produce. Zero when no category is
/// enabled.
pub fn charset_size(options: &GenerationOptions) -> usize {
    categories(options).map(str::len).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only(uppercase: bool, lowercase: bool, numbers: bool, symbols: bool) -> GenerationOptions {
        GenerationOptions {
            uppercase,
            lowercase,
            numbers,
            symbols,
            exclude_confusing: false,
            exclude_unsafe_symbols: false,
        }
    }

    #[test]
    fn full_charset_has_88_characters() {
        let options = GenerationOptions::default();
        assert_eq!(charset_size(&options), 26 + 26 + 10 + 26);
        assert_eq!(Charset::build(&options).unwrap().len(), 88);
    }

    #[test]
    fn categories_are_concatenated_in_fixed_order() {
        let charset = Charset::build(&only(true, false, true, false)).unwrap();
        assert_eq!(charset.as_string(), format!("{UPPERCASE}{NUMBERS}"));

        let charset = Charset::build(&only(false, true, false, true)).unwrap();
        assert!(charset.as_string().starts_with('a'));
        assert!(charset.as_string().ends_with('?'));
    }

    #[test]
    fn exclude_confusing_drops_lookalikes() {
        let options = GenerationOptions {
            exclude_confusing: true,
            symbols: false,
            ..GenerationOptions::default()
        };
        let charset = Charset::build(&options).unwrap();

        for c in ['I', 'L', 'O', 'i', 'l', 'o', '0', '1'] {
            assert!(!charset.contains(c), "{c} should be excluded");
        }
        assert_eq!(charset.len(), 23 + 23 + 8);
    }

    #[test]
    fn safe_symbols_are_a_subset() {
        assert!(SYMBOLS_SAFE.chars().all(|c| SYMBOLS.contains(c)));

        let options = GenerationOptions {
            exclude_unsafe_symbols: true,
            ..only(false, false, false, true)
        };
        assert_eq!(charset_size(&options), 12);
    }

    #[test]
    fn empty_selection_is_a_configuration_error() {
        let options = only(false, false, false, false);
        assert_eq!(charset_size(&options), 0);
        assert!(matches!(
            Charset::build(&options),
            Err(GeneratorError::Configuration(_))
        ));
    }

    #[test]
    fn size_never_decreases_as_categories_are_added() {
        for mask in 0u8..16 {
            let base = only(mask & 1 != 0, mask & 2 != 0, mask & 4 != 0, mask & 8 != 0);
            let base_size = charset_size(&base);

            for bit in 0..4 {
                let grown = mask | (1 << bit);
                let bigger = only(grown & 1 != 0, grown & 2 != 0, grown & 4 != 0, grown & 8 != 0);
                assert!(charset_size(&bigger) >= base_size);
            }

            let reduced = GenerationOptions {
                exclude_confusing: true,
                exclude_unsafe_symbols: true,
                ..base
            };
            assert!(charset_size(&reduced) <= base_size);
        }
    }

    #[test]
    fn categories_are_disjoint() {
        let charset = Charset::build(&GenerationOptions::default()).unwrap();
        let mut seen = charset.chars().to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), charset.len());
    }
}
