// src/core/config.rs
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;

use crate::clipboard::CLEAR_AFTER;
use crate::generators::DEFAULT_SEPARATOR;
use crate::models::GenerationOptions;
use crate::qr::QR_WIDTH;

// Configuration for the generator
#[derive(Debug, Clone)]
pub struct Config {
    // Password Generation
    pub default_password_length: usize,
    pub default_word_count: usize,
    pub passphrase_separator: String,
    pub default_exclude_confusing: bool,
    pub default_exclude_unsafe_symbols: bool,

    // History
    pub history_enabled: bool,
    pub data_directory: Option<PathBuf>,

    // Clipboard
    pub clipboard_clear_after: Duration,

    // QR
    pub qr_width: u32,

    // Logging
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Password Generation
            default_password_length: 16,
            default_word_count: 4,
            passphrase_separator: DEFAULT_SEPARATOR.to_string(),
            default_exclude_confusing: false,
            default_exclude_unsafe_symbols: false,

            // History
            history_enabled: true,
            data_directory: None, // Resolved from the platform data dir when unset

            // Clipboard
            clipboard_clear_after: CLEAR_AFTER,

            // QR
            qr_width: QR_WIDTH,

            // Logging
            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}

fn parse_var<T: FromStr>(vars: &HashMap<String, String>, key: &str, target: &mut T) {
    if let Some(val) = vars.get(key) {
        match val.trim().parse() {
            Ok(parsed) => *target = parsed,
            Err(_) => log::warn!("Ignoring invalid value '{}' for {}", val, key),
        }
    }
}

impl Config {
    // Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_vars(env::vars())
    }

    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: HashMap<String, String> = vars.into_iter().collect();
        let mut config = Config::default();

        // Password Generation
        parse_var(&vars, "DEFAULT_PASSWORD_LENGTH", &mut config.default_password_length);
        parse_var(&vars, "DEFAULT_WORD_COUNT", &mut config.default_word_count);

        if let Some(separator) = vars.get("PASSPHRASE_SEPARATOR") {
            config.passphrase_separator = separator.clone();
        }

        parse_var(&vars, "DEFAULT_EXCLUDE_CONFUSING", &mut config.default_exclude_confusing);
        parse_var(
            &vars,
            "DEFAULT_EXCLUDE_UNSAFE_SYMBOLS",
            &mut config.default_exclude_unsafe_symbols,
        );

        // History
        parse_var(&vars, "HISTORY_ENABLED", &mut config.history_enabled);

        if let Some(dir) = vars.get("DATA_DIRECTORY") {
            if !dir.trim().is_empty() {
                config.data_directory = Some(PathBuf::from(dir));
            }
        }

        // Clipboard
        let mut clear_seconds = config.clipboard_clear_after.as_secs();
        parse_var(&vars, "CLIPBOARD_CLEAR_SECONDS", &mut clear_seconds);
        config.clipboard_clear_after = Duration::from_secs(clear_seconds);

        // QR
        parse_var(&vars, "QR_WIDTH", &mut config.qr_width);

        // Logging
        if let Some(level) = vars.get("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "off" => config.log_level = LevelFilter::Off,
                "error" => config.log_level = LevelFilter::Error,
                "warn" => config.log_level = LevelFilter::Warn,
                "info" => config.log_level = LevelFilter::Info,
                "debug" => config.log_level = LevelFilter::Debug,
                "trace" => config.log_level = LevelFilter::Trace,
                _ => log::warn!("Unknown log level '{}', using {}", level, config.log_level),
            }
        }

        if let Some(file) = vars.get("LOG_FILE") {
            if !file.trim().is_empty() {
                config.log_file = Some(PathBuf::from(file));
            }
        }

        config
    }

    /// Generation options with every category enabled and the configured
    /// exclusions.
    pub fn default_options(&self) -> GenerationOptions {
        GenerationOptions {
            exclude_confusing: self.default_exclude_confusing,
            exclude_unsafe_symbols: self.default_exclude_unsafe_symbols,
            ..GenerationOptions::default()
        }
    }

    // Directory holding the history blob
    pub fn resolve_data_directory(&self) -> Option<PathBuf> {
        self.data_directory
            .clone()
            .or_else(crate::utils::get_app_data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_match_the_generator_contract() {
        let config = Config::from_vars(Vec::new());
        assert_eq!(config.default_password_length, 16);
        assert_eq!(config.default_word_count, 4);
        assert_eq!(config.passphrase_separator, "-");
        assert_eq!(config.clipboard_clear_after, Duration::from_secs(30));
        assert_eq!(config.qr_width, 200);
        assert!(config.history_enabled);
        assert_eq!(config.default_options(), GenerationOptions::default());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::from_vars(vars(&[
            ("DEFAULT_PASSWORD_LENGTH", "24"),
            ("DEFAULT_WORD_COUNT", "6"),
            ("PASSPHRASE_SEPARATOR", "."),
            ("DEFAULT_EXCLUDE_CONFUSING", "true"),
            ("HISTORY_ENABLED", "false"),
            ("DATA_DIRECTORY", "/tmp/passforge"),
            ("CLIPBOARD_CLEAR_SECONDS", "5"),
            ("LOG_LEVEL", "DEBUG"),
            ("LOG_FILE", "passforge.log"),
        ]));

        assert_eq!(config.default_password_length, 24);
        assert_eq!(config.default_word_count, 6);
        assert_eq!(config.passphrase_separator, ".");
        assert!(config.default_options().exclude_confusing);
        assert!(!config.history_enabled);
        assert_eq!(config.resolve_data_directory(), Some(PathBuf::from("/tmp/passforge")));
        assert_eq!(config.clipboard_clear_after, Duration::from_secs(5));
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.log_file, Some(PathBuf::from("passforge.log")));
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let config = Config::from_vars(vars(&[
            ("DEFAULT_PASSWORD_LENGTH", "sixteen"),
            ("HISTORY_ENABLED", "maybe"),
            ("LOG_LEVEL", "loud"),
        ]));

        assert_eq!(config.default_password_length, 16);
        assert!(config.history_enabled);
        assert_eq!(config.log_level, LevelFilter::Info);
    }
}
