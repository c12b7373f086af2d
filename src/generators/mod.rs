// src/generators/mod.rs
use thiserror::Error;

pub mod charset;
pub mod password;
pub mod random;
pub mod wordlist;

pub use charset::{charset_size, Charset};
pub use password::{
    generate_passphrase, generate_passphrase_with, generate_password, generate_password_with,
    PasswordGenerator, DEFAULT_SEPARATOR,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
