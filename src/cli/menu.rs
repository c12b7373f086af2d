// src/cli/menu.rs
use std::path::PathBuf;

use chrono::Utc;
use inquire::{Confirm, InquireError, Select, Text};

use passforge::models::GenerationOptions;
use passforge::utils::{format_time_ago, truncate_string};

use super::handlers::{
    copy_in_background, finish_pending_clear, passphrase_report, password_report, print_history,
    print_report, record_history, write_qr, App, GenerationReport, HandlerResult,
    PASSWORD_LENGTH_RANGE, WORD_COUNT_RANGE,
};

const GENERATE_PASSWORD: &str = "🔐  Generate password";
const GENERATE_PASSPHRASE: &str = "📝  Generate passphrase";
const VIEW_HISTORY: &str = "📜  View history";
const DELETE_ENTRY: &str = "🗑️  Delete history entry";
const CLEAR_HISTORY: &str = "🧹  Clear history";
const EXIT: &str = "❌  Exit";

const COPY: &str = "📋  Copy to clipboard";
const SAVE_QR: &str = "🔳  Save QR code";
const BACK: &str = "↩️  Back to menu";

pub fn run_cli_menu(app: &App) -> HandlerResult<()> {
    println!("🦀🔐 Welcome to");
    println!("╔══════════════════════════════════════╗");
    println!("║          🦀 PASSFORGE                ║");
    println!("╚══════════════════════════════════════╝");

    loop {
        let options = vec![
            GENERATE_PASSWORD,
            GENERATE_PASSPHRASE,
            VIEW_HISTORY,
            DELETE_ENTRY,
            CLEAR_HISTORY,
            EXIT,
        ];

        let selection = Select::new("Choose an option:", options)
            .with_help_message("Use arrow keys to navigate, Enter to select. Esc or Ctrl+C to exit.")
            .prompt_skippable();

        let result = match selection {
            Ok(Some(GENERATE_PASSWORD)) => generate_password_flow(app),
            Ok(Some(GENERATE_PASSPHRASE)) => generate_passphrase_flow(app),
            Ok(Some(VIEW_HISTORY)) => view_history_flow(app),
            Ok(Some(DELETE_ENTRY)) => delete_entry_flow(app),
            Ok(Some(CLEAR_HISTORY)) => clear_history_flow(app),
            Ok(Some(_)) | Ok(None) | Err(InquireError::OperationInterrupted) => break,
            Err(e) => return Err(Box::new(e)),
        };

        if let Err(e) = result {
            match e.downcast_ref::<InquireError>() {
                Some(InquireError::OperationCanceled) => {}
                Some(InquireError::OperationInterrupted) => break,
                _ => eprintln!("❌ {}", e),
            }
        }
    }

    finish_pending_clear(app)?;
    println!("👋 Goodbye!");
    Ok(())
}

fn prompt_number(message: &str, default: usize) -> HandlerResult<usize> {
    let value = Text::new(message)
        .with_default(&default.to_string())
        .prompt()
        .and_then(|s| {
            s.trim()
                .parse()
                .map_err(|_| InquireError::Custom("Invalid number".into()))
        })?;
    Ok(value)
}

fn generate_password_flow(app: &App) -> HandlerResult<()> {
    let length = prompt_number("Password length:", app.default_length())?;
    if !PASSWORD_LENGTH_RANGE.contains(&length) {
        println!(
            "❌ Length must be between {} and {}",
            PASSWORD_LENGTH_RANGE.start(),
            PASSWORD_LENGTH_RANGE.end()
        );
        return Ok(());
    }

    let uppercase = Confirm::new("Include uppercase letters?")
        .with_default(true)
        .prompt()?;

    let lowercase = Confirm::new("Include lowercase letters?")
        .with_default(true)
        .prompt()?;

    let numbers = Confirm::new("Include numbers?")
        .with_default(true)
        .prompt()?;

    let symbols = Confirm::new("Include symbols?")
        .with_default(true)
        .prompt()?;

    let exclude_confusing = Confirm::new("Exclude confusing characters (like I, l, 1, O, 0)?")
        .with_default(app.config.default_exclude_confusing)
        .prompt()?;

    let exclude_unsafe_symbols = symbols
        && Confirm::new("Only use symbols that most sites accept?")
            .with_default(app.config.default_exclude_unsafe_symbols)
            .prompt()?;

    let options = GenerationOptions {
        uppercase,
        lowercase,
        numbers,
        symbols,
        exclude_confusing,
        exclude_unsafe_symbols,
    };

    match password_report(length, &options) {
        Ok(mut report) => {
            record_history(app, &mut report, false);
            print_report(app, &report)?;
            after_generation(app, &report)
        }
        Err(e) => {
            println!("❌ {}", e);
            Ok(())
        }
    }
}

fn generate_passphrase_flow(app: &App) -> HandlerResult<()> {
    let words = prompt_number("Number of words:", app.default_word_count())?;
    if !WORD_COUNT_RANGE.contains(&words) {
        println!(
            "❌ Word count must be between {} and {}",
            WORD_COUNT_RANGE.start(),
            WORD_COUNT_RANGE.end()
        );
        return Ok(());
    }

    let separator = Text::new("Separator:")
        .with_default(&app.config.passphrase_separator)
        .prompt()?;

    let mut report = passphrase_report(words, &separator);
    record_history(app, &mut report, false);
    print_report(app, &report)?;
    after_generation(app, &report)
}

fn after_generation(app: &App, report: &GenerationReport) -> HandlerResult<()> {
    loop {
        let action = Select::new("What next?", vec![COPY, SAVE_QR, BACK]).prompt_skippable()?;

        match action {
            Some(COPY) => copy_in_background(app, &report.password)?,
            Some(SAVE_QR) => {
                let path = Text::new("Save QR code to (file or directory):")
                    .with_default(".")
                    .prompt()?;
                match write_qr(app, &report.password, &PathBuf::from(path)) {
                    Ok(target) => println!("✅ QR code saved to {}", target.display()),
                    Err(e) => println!("❌ Could not save QR code: {}", e),
                }
            }
            _ => return Ok(()),
        }
    }
}

fn view_history_flow(app: &App) -> HandlerResult<()> {
    let records = app.history.list();
    print_history(app, &records, false)?;

    if !records.is_empty()
        && Confirm::new("Reveal passwords?")
            .with_default(false)
            .prompt()?
    {
        print_history(app, &records, true)?;
    }
    Ok(())
}

fn delete_entry_flow(app: &App) -> HandlerResult<()> {
    let records = app.history.list();
    if records.is_empty() {
        println!("📭 No passwords in history yet.");
        return Ok(());
    }

    let now = Utc::now();
    let labels: Vec<String> = records
        .iter()
        .map(|r| {
            format!(
                "{} • {} • {} chars • {}",
                truncate_string(&r.id, 11),
                r.strength,
                r.length,
                format_time_ago(r.created_at, now)
            )
        })
        .collect();

    let Some(choice) = Select::new("Select a record to delete:", labels.clone()).prompt_skippable()? else {
        return Ok(());
    };

    if let Some(record) = labels
        .iter()
        .position(|label| *label == choice)
        .and_then(|index| records.get(index))
    {
        app.history.delete_one(&record.id);
        println!("🗑️ Deleted history record {}", record.id);
    }
    Ok(())
}

fn clear_history_flow(app: &App) -> HandlerResult<()> {
    let confirmed = Confirm::new("Clear all password history?")
        .with_default(false)
        .prompt()?;

    if confirmed {
        app.history.clear_all();
        println!("🧹 History cleared");
    }
    Ok(())
}
