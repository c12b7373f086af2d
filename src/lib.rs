//! Local password and passphrase generation with strength analysis,
//! compliance badges and a capped generation history.

pub mod analysis;
pub mod clipboard;
pub mod core;
pub mod generators;
pub mod history;
pub mod logging;
pub mod models;
pub mod qr;
pub mod utils;

pub use analysis::{analyze_passphrase_strength, analyze_password_strength, check_compliance};
pub use generators::{charset_size, generate_passphrase, generate_password, GeneratorError};
pub use history::{HistoryStore, StorageError};
pub use models::{
    ComplianceBadges, GenerationMode, GenerationOptions, HistoryRecord, PasswordStrength,
    StrengthTier,
};
pub use qr::{render_qr, RenderError};
