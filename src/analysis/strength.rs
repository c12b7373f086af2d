// src/analysis/strength.rs
use crate::models::{PasswordStrength, StrengthTier};

/// Assumed brute-force rate of the attacker.
pub const GUESSES_PER_SECOND: f64 = 1_000_000.0;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const YEAR: f64 = 31_536_000.0;

/// Entropy in bits of `symbols` independent draws from an alphabet of
/// `alphabet_size` entries.
pub fn calculate_entropy(symbols: usize, alphabet_size: usize) -> f64 {
    if symbols == 0 || alphabet_size == 0 {
        return 0.0;
    }
    symbols as f64 * (alphabet_size as f64).log2()
}

pub fn strength_tier(entropy_bits: f64) -> StrengthTier {
    if entropy_bits >= 128.0 {
        StrengthTier::VeryStrong
    } else if entropy_bits >= 100.0 {
        StrengthTier::Strong
    } else if entropy_bits >= 80.0 {
        StrengthTier::Good
    } else if entropy_bits >= 60.0 {
        StrengthTier::Fair
    } else {
        StrengthTier::Weak
    }
}

fn plural(count: f64, unit: &str) -> String {
    if count == 1.0 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

/// Expected time to find the secret by brute force: half of the keyspace
/// at [`GUESSES_PER_SECOND`], rendered in the largest sensible unit.
pub fn estimate_crack_time(entropy_bits: f64) -> String {
    let mut seconds = 2f64.powf(entropy_bits) / 2.0 / GUESSES_PER_SECOND;
    // 2^1024 and up overflows f64
    if !seconds.is_finite() {
        seconds = f64::MAX;
    }

    if seconds < 1.0 {
        return "under 1 second".to_string();
    }
    if seconds < MINUTE {
        return plural(seconds.round(), "second");
    }
    if seconds < HOUR {
        return plural((seconds / MINUTE).round(), "minute");
    }
    if seconds < DAY {
        return plural((seconds / HOUR).round(), "hour");
    }
    if seconds < YEAR {
        return plural((seconds / DAY).round(), "day");
    }

    let years = (seconds / YEAR).round();
    if years < 1000.0 {
        return plural(years, "year");
    }
    format!("{:.1} thousand years", years / 1000.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn strength_from_entropy(entropy_bits: f64) -> PasswordStrength {
    PasswordStrength {
        entropy_bits: round2(entropy_bits),
        tier: strength_tier(entropy_bits),
        crack_time: estimate_crack_time(entropy_bits),
    }
}

/// Strength of a password produced from a charset of `charset_size`
/// characters. Only the length of `password` is used.
pub fn analyze_password_strength(password: &str, charset_size: usize) -> PasswordStrength {
    strength_from_entropy(calculate_entropy(password.chars().count(), charset_size))
}

/// Strength of a passphrase of `word_count` words drawn from a list of
/// `wordlist_size` words.
pub fn analyze_passphrase_strength(word_count: usize, wordlist_size: usize) -> PasswordStrength {
    strength_from_entropy(calculate_entropy(word_count, wordlist_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_chars_from_94_is_strong() {
        let password = "x".repeat(16);
        let strength = analyze_password_strength(&password, 94);

        assert!((strength.entropy_bits - 104.87).abs() < 0.01);
        assert_eq!(strength.tier, StrengthTier::Strong);
    }

    #[test]
    fn eight_lowercase_is_weak() {
        let strength = analyze_password_strength("abcdefgh", 26);

        assert!((strength.entropy_bits - 37.6).abs() < 0.01);
        assert_eq!(strength.tier, StrengthTier::Weak);
        assert_eq!(strength.crack_time, "1 day");
    }

    #[test]
    fn tier_bounds_are_inclusive() {
        assert_eq!(strength_tier(59.99), StrengthTier::Weak);
        assert_eq!(strength_tier(60.0), StrengthTier::Fair);
        assert_eq!(strength_tier(80.0), StrengthTier::Good);
        assert_eq!(strength_tier(100.0), StrengthTier::Strong);
        assert_eq!(strength_tier(128.0), StrengthTier::VeryStrong);
    }

    #[test]
    fn entropy_is_rounded_to_two_decimals() {
        let strength = analyze_password_strength("abc", 3);
        // 3 * log2(3) = 4.7548...
        assert_eq!(strength.entropy_bits, 4.75);
    }

    #[test]
    fn degenerate_inputs_have_zero_entropy() {
        assert_eq!(calculate_entropy(0, 94), 0.0);
        assert_eq!(calculate_entropy(12, 0), 0.0);
        assert_eq!(calculate_entropy(12, 1), 0.0);

        let strength = analyze_password_strength("", 94);
        assert_eq!(strength.tier, StrengthTier::Weak);
        assert_eq!(strength.crack_time, "under 1 second");
    }

    #[test]
    fn crack_time_units() {
        // seconds = 2^(e-1) / 1e6
        assert_eq!(estimate_crack_time(10.0), "under 1 second");
        assert_eq!(estimate_crack_time(21.0), "1 second");
        assert_eq!(estimate_crack_time(25.0), "17 seconds");
        assert_eq!(estimate_crack_time(30.0), "9 minutes");
        assert_eq!(estimate_crack_time(35.0), "5 hours");
        assert_eq!(estimate_crack_time(40.0), "6 days");
        assert_eq!(estimate_crack_time(50.0), "18 years");
        assert_eq!(estimate_crack_time(64.0), "292.5 thousand years");
    }

    #[test]
    fn huge_entropy_does_not_overflow() {
        let rendered = estimate_crack_time(5000.0);
        assert!(rendered.ends_with("thousand years"));
        assert!(!rendered.contains("inf"));
    }

    #[test]
    fn passphrase_uses_word_combinatorics() {
        let strength = analyze_passphrase_strength(4, 40);
        // 4 * log2(40) = 21.2877...
        assert_eq!(strength.entropy_bits, 21.29);
        assert_eq!(strength.tier, StrengthTier::Weak);
    }
}
