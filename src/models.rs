// src/models.rs
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Password generation options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
    pub exclude_confusing: bool,
    pub exclude_unsafe_symbols: bool,
}

impl GenerationOptions {
    /// True when at least one character category is enabled.
    pub fn has_any_category(&self) -> bool {
        self.uppercase || self.lowercase || self.numbers || self.symbols
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: true,
            exclude_confusing: false,
            exclude_unsafe_symbols: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    Password,
    Passphrase,
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationMode::Password => write!(f, "password"),
            GenerationMode::Passphrase => write!(f, "passphrase"),
        }
    }
}

/// Strength tier derived from entropy bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrengthTier {
    Weak,
    Fair,
    Good,
    Strong,
    VeryStrong,
}

impl StrengthTier {
    pub fn label(&self) -> &'static str {
        match self {
            StrengthTier::Weak => "weak",
            StrengthTier::Fair => "fair",
            StrengthTier::Good => "good",
            StrengthTier::Strong => "strong",
            StrengthTier::VeryStrong => "very-strong",
        }
    }
}

impl fmt::Display for StrengthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordStrength {
    /// Entropy in bits, rounded to two decimals.
    pub entropy_bits: f64,
    pub tier: StrengthTier,
    pub crack_time: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceBadges {
    pub nist: bool,
    pub owasp: bool,
    pub strong: bool,
    pub complex: bool,
}

// A generated secret kept in the local history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: String,
    pub password: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub strength: StrengthTier,
    pub length: usize,
}
