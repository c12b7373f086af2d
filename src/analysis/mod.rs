// src/analysis/mod.rs
//! Strength estimation and compliance heuristics for generated secrets.

pub mod compliance;
pub mod strength;

pub use compliance::check_compliance;
pub use strength::{
    analyze_passphrase_strength, analyze_password_strength, calculate_entropy,
    estimate_crack_time, strength_tier, GUESSES_PER_SECOND,
};
