// src/cli/commands.rs
use std::path::PathBuf;

use clap::{Args, Subcommand};
use passforge::models::GenerationOptions;

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Generate a random password
    Generate {
        /// Password length
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(8..=32))]
        length: Option<u8>,

        #[command(flatten)]
        categories: CategoryArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate a passphrase of random words
    Passphrase {
        /// Number of words
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(3..=7))]
        words: Option<u8>,

        /// Separator placed between words
        #[arg(short, long)]
        separator: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Report strength and compliance badges for a password
    Check {
        /// Password to analyze
        #[arg(required = true)]
        password: String,

        #[command(flatten)]
        categories: CategoryArgs,
    },

    /// Manage the generation history
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// List stored records, newest first
    List {
        /// Show passwords instead of masking them
        #[arg(long)]
        reveal: bool,
    },

    /// Delete a record by ID
    Delete {
        /// Record ID
        #[arg(required = true)]
        id: String,
    },

    /// Delete every record
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

/// Character category switches. Every category is on unless disabled.
#[derive(Args, Debug, Clone, Default)]
pub struct CategoryArgs {
    /// Leave out uppercase letters
    #[arg(long)]
    pub no_uppercase: bool,

    /// Leave out lowercase letters
    #[arg(long)]
    pub no_lowercase: bool,

    /// Leave out digits
    #[arg(long)]
    pub no_numbers: bool,

    /// Leave out symbols
    #[arg(long)]
    pub no_symbols: bool,

    /// Drop look-alike characters (I, L, O, i, l, o, 0, 1)
    #[arg(long)]
    pub exclude_confusing: bool,

    /// Restrict symbols to those accepted by most forms
    #[arg(long)]
    pub exclude_unsafe_symbols: bool,
}

impl CategoryArgs {
    /// Options from the flags; the exclusions fall back to the given
    /// defaults when the flag is absent.
    pub fn to_options(&self, exclude_confusing: bool, exclude_unsafe_symbols: bool) -> GenerationOptions {
        GenerationOptions {
            uppercase: !self.no_uppercase,
            lowercase: !self.no_lowercase,
            numbers: !self.no_numbers,
            symbols: !self.no_symbols,
            exclude_confusing: self.exclude_confusing || exclude_confusing,
            exclude_unsafe_symbols: self.exclude_unsafe_symbols || exclude_unsafe_symbols,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Copy the result to the clipboard and clear it after the configured delay
    #[arg(long, short)]
    pub copy: bool,

    /// Write a QR code PNG to this file or directory
    #[arg(long, value_name = "PATH")]
    pub qr: Option<PathBuf>,

    /// Include the QR code as a PNG data URI
    #[arg(long)]
    pub qr_uri: bool,

    /// Do not record the result in the history
    #[arg(long)]
    pub no_history: bool,
}
