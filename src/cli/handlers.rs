// src/cli/handlers.rs
use std::cell::RefCell;
use std::error::Error;
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::thread;

use chrono::Utc;
use console::{style, StyledObject, Term};
use inquire::Confirm;
use serde::Serialize;

use passforge::clipboard::{
    ClearOutcome, ClipboardManager, OpenClipboard, SystemClipboard, COPIED_INDICATOR,
};
use passforge::core::Config;
use passforge::generators::{charset_size, GeneratorError, PasswordGenerator};
use passforge::history::{FileStore, HistoryStore, KeyValueStore, MemoryStore};
use passforge::models::{
    ComplianceBadges, GenerationMode, GenerationOptions, HistoryRecord, PasswordStrength,
    StrengthTier,
};
use passforge::qr::{render_qr, render_qr_png};
use passforge::utils::{format_time_ago, mask_secret};

use super::commands::{CategoryArgs, HistoryCommand, OutputArgs};

pub const PASSWORD_LENGTH_RANGE: RangeInclusive<usize> = 8..=32;
pub const WORD_COUNT_RANGE: RangeInclusive<usize> = 3..=7;

pub type HandlerResult<T> = Result<T, Box<dyn Error>>;

// Shared state for the command handlers and the interactive menu
pub struct App {
    pub config: Config,
    pub history: HistoryStore<Box<dyn KeyValueStore>>,
    pub clipboard: RefCell<ClipboardManager<OpenClipboard>>,
    pub json: bool,
}

impl App {
    pub fn new(config: Config, json: bool) -> Self {
        let store: Box<dyn KeyValueStore> = match config.resolve_data_directory() {
            Some(dir) => {
                log::debug!("History stored in {}", dir.display());
                Box::new(FileStore::new(dir))
            }
            None => {
                log::warn!("No data directory available, history will not outlive this session");
                Box::new(MemoryStore::new())
            }
        };

        Self::with_store(config, store, json)
    }

    pub fn with_store(config: Config, store: Box<dyn KeyValueStore>, json: bool) -> Self {
        Self::with_backends(config, store, SystemClipboard::open_boxed, json)
    }

    pub fn with_backends(
        config: Config,
        store: Box<dyn KeyValueStore>,
        open_clipboard: OpenClipboard,
        json: bool,
    ) -> Self {
        let clipboard = ClipboardManager::new(open_clipboard, config.clipboard_clear_after);
        App {
            config,
            history: HistoryStore::new(store),
            clipboard: RefCell::new(clipboard),
            json,
        }
    }

    pub fn default_length(&self) -> usize {
        self.config
            .default_password_length
            .clamp(*PASSWORD_LENGTH_RANGE.start(), *PASSWORD_LENGTH_RANGE.end())
    }

    pub fn default_word_count(&self) -> usize {
        self.config
            .default_word_count
            .clamp(*WORD_COUNT_RANGE.start(), *WORD_COUNT_RANGE.end())
    }
}

// Result of one generation, as printed or serialized
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    pub mode: GenerationMode,
    pub password: String,
    pub length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset_size: Option<usize>,
    pub strength: PasswordStrength,
    pub compliance: ComplianceBadges,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_data_uri: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub length: usize,
    pub charset_size: usize,
    pub strength: PasswordStrength,
    pub compliance: ComplianceBadges,
}

pub fn password_report(
    length: usize,
    options: &GenerationOptions,
) -> Result<GenerationReport, GeneratorError> {
    let generator = PasswordGenerator::new();
    let password = generator.generate_password(length, options)?;

    Ok(GenerationReport {
        mode: GenerationMode::Password,
        length: password.chars().count(),
        charset_size: Some(charset_size(options)),
        strength: generator.analyze_password_strength(&password, options),
        compliance: generator.check_compliance(&password, options),
        password,
        history_id: None,
        qr_file: None,
        qr_data_uri: None,
    })
}

pub fn passphrase_report(word_count: usize, separator: &str) -> GenerationReport {
    let generator = PasswordGenerator::with_separator(separator);
    let passphrase = generator.generate_passphrase(word_count);

    GenerationReport {
        mode: GenerationMode::Passphrase,
        length: passphrase.chars().count(),
        charset_size: None,
        strength: generator.analyze_passphrase_strength(word_count),
        compliance: generator.check_compliance(&passphrase, &GenerationOptions::default()),
        password: passphrase,
        history_id: None,
        qr_file: None,
        qr_data_uri: None,
    }
}

// Save the report to the history unless disabled; failures only warn
pub fn record_history(app: &App, report: &mut GenerationReport, skip: bool) {
    if skip || !app.config.history_enabled {
        return;
    }

    match app
        .history
        .try_save(&report.password, report.strength.tier, report.length)
    {
        Ok(record) => report.history_id = Some(record.id),
        Err(e) => log::warn!("Error saving to history: {}", e),
    }
}

pub fn styled_tier(tier: StrengthTier) -> StyledObject<&'static str> {
    let label = style(tier.label()).bold();
    match tier {
        StrengthTier::Weak => label.red(),
        StrengthTier::Fair => label.yellow(),
        StrengthTier::Good => label.cyan(),
        StrengthTier::Strong | StrengthTier::VeryStrong => label.green(),
    }
}

fn badge(name: &str, passed: bool) -> String {
    if passed {
        format!("{} {}", style("✓").green(), name)
    } else {
        format!("{} {}", style("✗").red(), style(name).dim())
    }
}

fn print_analysis(strength: &PasswordStrength, compliance: &ComplianceBadges) {
    println!("Entropy:     {:.2} bits", strength.entropy_bits);
    println!("Strength:    {}", styled_tier(strength.tier));
    println!("Crack time:  {}", strength.crack_time);
    println!(
        "Compliance:  {}  {}  {}  {}",
        badge("NIST", compliance.nist),
        badge("OWASP", compliance.owasp),
        badge("Strong", compliance.strong),
        badge("Complex", compliance.complex),
    );
}

pub fn print_json<T: Serialize>(value: &T) -> HandlerResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_report(app: &App, report: &GenerationReport) -> HandlerResult<()> {
    if app.json {
        return print_json(report);
    }

    let title = match report.mode {
        GenerationMode::Password => "Password:   ",
        GenerationMode::Passphrase => "Passphrase: ",
    };
    println!("\n{} {}", title, style(&report.password).bold());
    println!("Length:      {}", report.length);
    if let Some(size) = report.charset_size {
        println!("Charset:     {} characters", size);
    }
    print_analysis(&report.strength, &report.compliance);
    if let Some(path) = &report.qr_file {
        println!("QR code:     {}", path.display());
    }
    if let Some(uri) = &report.qr_data_uri {
        println!("QR data URI: {}", uri);
    }
    Ok(())
}

// A directory target gets a timestamped file name
fn qr_target(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(format!("password-qr-{}.png", Utc::now().timestamp_millis()))
    } else {
        path.to_path_buf()
    }
}

pub fn write_qr(app: &App, secret: &str, path: &Path) -> HandlerResult<PathBuf> {
    let png = render_qr_png(secret, app.config.qr_width)?;
    let target = qr_target(path);
    fs::write(&target, png)?;
    log::info!("QR code written to {}", target.display());
    Ok(target)
}

fn report_clear(term: &Term, outcome: Option<ClearOutcome>) -> HandlerResult<()> {
    match outcome {
        Some(ClearOutcome::Cleared) => term.write_line("🧹 Clipboard cleared")?,
        Some(ClearOutcome::Replaced) => {
            term.write_line("Clipboard changed since copy, left untouched")?
        }
        Some(ClearOutcome::Failed) => term.write_line("⚠️ Could not clear the clipboard")?,
        Some(ClearOutcome::Cancelled) | None => {}
    }
    Ok(())
}

/// Copy `secret` and schedule its removal without blocking. A clear still
/// pending from an earlier copy is replaced.
pub fn copy_in_background(app: &App, secret: &str) -> HandlerResult<()> {
    let mut clipboard = app.clipboard.borrow_mut();
    clipboard.copy(secret)?;

    Term::stderr().write_line(&format!(
        "{} Copied! The clipboard will be cleared in {}s",
        style("✓").green().bold(),
        clipboard.clear_after().as_secs()
    ))?;
    Ok(())
}

/// Block until a clear scheduled by [`copy_in_background`] has run.
pub fn finish_pending_clear(app: &App) -> HandlerResult<Option<ClearOutcome>> {
    let mut clipboard = app.clipboard.borrow_mut();
    if !clipboard.is_pending() {
        return Ok(None);
    }

    let term = Term::stderr();
    term.write_line("📋 Waiting to clear the clipboard before exit (Ctrl+C to leave it)")?;
    let outcome = clipboard.wait();
    report_clear(&term, outcome)?;
    Ok(outcome)
}

/// Copy `secret`, show the copied indicator, then block until the clipboard
/// has been cleared.
pub fn copy_to_clipboard(app: &App, secret: &str) -> HandlerResult<()> {
    let mut clipboard = app.clipboard.borrow_mut();
    clipboard.copy(secret)?;

    let term = Term::stderr();
    term.write_line(&format!("{} Copied!", style("✓").green().bold()))?;
    thread::sleep(COPIED_INDICATOR);
    if term.is_term() {
        term.clear_last_lines(1)?;
    }

    term.write_line(&format!(
        "📋 Clipboard will be cleared in {}s (Ctrl+C to leave it)",
        clipboard.clear_after().as_secs()
    ))?;

    let outcome = clipboard.wait();
    report_clear(&term, outcome)
}

// Shared tail of the generate and passphrase commands
fn finish_generation(app: &App, mut report: GenerationReport, output: &OutputArgs) -> HandlerResult<()> {
    record_history(app, &mut report, output.no_history);

    if let Some(path) = &output.qr {
        match write_qr(app, &report.password, path) {
            Ok(target) => report.qr_file = Some(target),
            Err(e) => {
                log::error!("Error generating QR code: {}", e);
                eprintln!("⚠️ Could not write QR code: {}", e);
            }
        }
    }

    if output.qr_uri {
        // empty when the secret cannot be encoded
        let uri = render_qr(&report.password);
        if !uri.is_empty() {
            report.qr_data_uri = Some(uri);
        }
    }

    print_report(app, &report)?;

    if output.copy {
        copy_to_clipboard(app, &report.password)?;
    }
    Ok(())
}

pub fn handle_generate(
    app: &App,
    length: Option<u8>,
    categories: &CategoryArgs,
    output: &OutputArgs,
) -> HandlerResult<()> {
    let length = length.map(usize::from).unwrap_or_else(|| app.default_length());
    let options = categories.to_options(
        app.config.default_exclude_confusing,
        app.config.default_exclude_unsafe_symbols,
    );

    let report = password_report(length, &options)?;
    finish_generation(app, report, output)
}

pub fn handle_passphrase(
    app: &App,
    words: Option<u8>,
    separator: Option<&str>,
    output: &OutputArgs,
) -> HandlerResult<()> {
    let words = words.map(usize::from).unwrap_or_else(|| app.default_word_count());
    let separator = separator.unwrap_or(&app.config.passphrase_separator);

    let report = passphrase_report(words, separator);
    finish_generation(app, report, output)
}

pub fn check_report(password: &str, options: &GenerationOptions) -> CheckReport {
    let generator = PasswordGenerator::new();
    CheckReport {
        length: password.chars().count(),
        charset_size: charset_size(options),
        strength: generator.analyze_password_strength(password, options),
        compliance: generator.check_compliance(password, options),
    }
}

pub fn handle_check(app: &App, password: &str, categories: &CategoryArgs) -> HandlerResult<()> {
    let options = categories.to_options(
        app.config.default_exclude_confusing,
        app.config.default_exclude_unsafe_symbols,
    );
    let report = check_report(password, &options);

    if app.json {
        return print_json(&report);
    }

    println!("Length:      {}", report.length);
    println!("Charset:     {} characters", report.charset_size);
    print_analysis(&report.strength, &report.compliance);
    Ok(())
}

pub fn print_history(app: &App, records: &[HistoryRecord], reveal: bool) -> HandlerResult<()> {
    let shown: Vec<HistoryRecord> = records
        .iter()
        .cloned()
        .map(|mut record| {
            if !reveal {
                record.password = mask_secret(&record.password);
            }
            record
        })
        .collect();

    if app.json {
        return print_json(&shown);
    }

    if shown.is_empty() {
        println!("📭 No passwords in history yet.");
        return Ok(());
    }

    let now = Utc::now();
    println!("\n📜 Recent passwords ({}):", shown.len());
    for record in &shown {
        println!(
            "{}  {:<11}  {:>3}  {:<16}  {}",
            style(&record.id).dim(),
            styled_tier(record.strength),
            record.length,
            format_time_ago(record.created_at, now),
            record.password
        );
    }
    Ok(())
}

pub fn handle_history(app: &App, action: &HistoryCommand) -> HandlerResult<()> {
    match action {
        HistoryCommand::List { reveal } => {
            let records = app.history.try_list()?;
            print_history(app, &records, *reveal)
        }
        HistoryCommand::Delete { id } => {
            let exists = app.history.try_list()?.iter().any(|r| &r.id == id);
            app.history.try_delete_one(id)?;

            if app.json {
                print_json(&serde_json::json!({ "deleted": exists, "id": id }))
            } else {
                if exists {
                    println!("🗑️ Deleted history record {}", id);
                } else {
                    println!("No history record with ID {}", id);
                }
                Ok(())
            }
        }
        HistoryCommand::Clear { yes } => {
            let confirmed = *yes
                || Confirm::new("Clear all password history?")
                    .with_default(false)
                    .prompt()?;

            if confirmed {
                app.history.try_clear_all()?;
                log::info!("History cleared");
            }

            if app.json {
                print_json(&serde_json::json!({ "cleared": confirmed }))
            } else {
                if confirmed {
                    println!("🧹 History cleared");
                } else {
                    println!("History left unchanged");
                }
                Ok(())
            }
        }
    }
}
