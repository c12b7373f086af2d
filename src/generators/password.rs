// src/generators/password.rs
use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};

use super::charset::Charset;
use super::random::select;
use super::wordlist::WORDLIST;
use super::Result;
use crate::analysis::{self, check_compliance};
use crate::generators::charset_size;
use crate::models::{ComplianceBadges, GenerationOptions, PasswordStrength};

pub const DEFAULT_SEPARATOR: &str = "-";

/// Generate a password of `length` characters drawn from the charset built
/// from `options`.
pub fn generate_password(length: usize, options: &GenerationOptions) -> Result<String> {
    generate_password_with(&mut OsRng, length, options)
}

pub fn generate_password_with<R>(rng: &mut R, length: usize, options: &GenerationOptions) -> Result<String>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let charset = Charset::build(options)?;
    let password: String = select(rng, charset.chars(), length)?.into_iter().collect();

    log::debug!(
        "Generated password of {} characters from a {}-character charset",
        length,
        charset.len()
    );
    Ok(password)
}

/// Generate a passphrase of `word_count` words joined by `separator`.
pub fn generate_passphrase(word_count: usize, separator: &str) -> String {
    generate_passphrase_with(&mut OsRng, word_count, separator)
}

pub fn generate_passphrase_with<R>(rng: &mut R, word_count: usize, separator: &str) -> String
where
    R: RngCore + CryptoRng + ?Sized,
{
    passphrase_from(rng, WORDLIST, word_count, separator).unwrap_or_else(|e| {
        log::error!("Error generating passphrase: {}", e);
        String::new()
    })
}

/// Join `word_count` words drawn from `words`. Fails on an empty list.
pub fn passphrase_from<R>(rng: &mut R, words: &[&str], word_count: usize, separator: &str) -> Result<String>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let picked: Vec<&str> = select(rng, words, word_count)?.into_iter().copied().collect();

    log::debug!("Generated passphrase of {} words", picked.len());
    Ok(picked.join(separator))
}

pub struct PasswordGenerator {
    separator: String,
}

impl PasswordGenerator {
    pub fn new() -> Self {
        PasswordGenerator {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    pub fn with_separator(separator: impl Into<String>) -> Self {
        PasswordGenerator {
            separator: separator.into(),
        }
    }

    pub fn generate_password(&self, length: usize, options: &GenerationOptions) -> Result<String> {
        generate_password(length, options)
    }

    pub fn generate_passphrase(&self, word_count: usize) -> String {
        generate_passphrase(word_count, &self.separator)
    }

    pub fn analyze_password_strength(&self, password: &str, options: &GenerationOptions) -> PasswordStrength {
        analysis::analyze_password_strength(password, charset_size(options))
    }

    pub fn analyze_passphrase_strength(&self, word_count: usize) -> PasswordStrength {
        analysis::analyze_passphrase_strength(word_count, WORDLIST.len())
    }

    pub fn check_compliance(&self, password: &str, options: &GenerationOptions) -> ComplianceBadges {
        check_compliance(password, options)
    }
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}
