//! Sealbook CLI - a local, encrypted store for passwords and other small records
//!
//! This is the command-line interface for sealbook. It provides a
//! user-friendly interface to the core library functionality.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod ui;

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{generate, init, misc, records, transfer, vault};
use crate::constants::{LOG_ENV, PASSWORD_ENV};
use crate::errors::exit_code_for;
use crate::ui::{print_error, UiContext};

/// Logs go to stderr so stdout stays clean for exports and JSON.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Unable to set global default subscriber");
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        let ui_ctx = UiContext::from_env(false, cli.no_color, cli.ascii);
        let error_msg = format!("{}", e);
        let (message, hint) = split_hint(&error_msg);
        let hint = hint.or_else(|| extract_error_hint(message));

        print_error(&ui_ctx, message, hint.as_deref());
        std::process::exit(exit_code_for(&e));
    }
}

/// Split an explicit "\nHint: ..." suffix off an error message.
fn split_hint(error: &str) -> (&str, Option<String>) {
    for marker in ["\nHint:", "\nhint:"] {
        if let Some(idx) = error.find(marker) {
            let hint = error[idx + marker.len()..].trim();
            return (&error[..idx], Some(hint.to_string()));
        }
    }
    (error, None)
}

/// Contextual hints for common error messages.
fn extract_error_hint(error: &str) -> Option<String> {
    let error_lower = error.to_lowercase();

    if error_lower.contains("record not found") {
        return Some("Run `sealbook list` to see record ids.".to_string());
    }
    if error_lower.contains("has no field") {
        return Some("Run `sealbook show <id>` to see field names.".to_string());
    }
    if error_lower.contains("changed since it was read") {
        return Some("Run `sealbook show <id>` and retry with the current version.".to_string());
    }
    if error_lower.contains("wrong master password") {
        return Some(format!(
            "Check your master password, or the value of {}.",
            PASSWORD_ENV
        ));
    }
    if error_lower.contains("malformed ciphertext") || error_lower.contains("decryption failed") {
        return Some(
            "The vault file is damaged or was modified. Restore it from a backup.".to_string(),
        );
    }
    if error_lower.contains("weak master password") {
        return Some("Use a longer passphrase, such as several unrelated words.".to_string());
    }
    if error_lower.contains("malformed document") || error_lower.contains("unsupported format") {
        return Some(
            "`sealbook export --plain` shows the expected document layout.".to_string(),
        );
    }
    if error_lower.contains("operation cancelled") {
        return Some("Nothing was written.".to_string());
    }

    None
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };
    if let Commands::Completions(args) = command {
        return misc::handle_completions(args);
    }

    let ctx = AppContext::new(cli)?;
    match command {
        Commands::Init(args) => init::handle_init(&ctx, args)?,
        Commands::List(args) => records::handle_list(&ctx, args)?,
        Commands::Show(args) => records::handle_show(&ctx, args)?,
        Commands::Add(args) => records::handle_add(&ctx, args)?,
        Commands::Edit(args) => records::handle_edit(&ctx, args)?,
        Commands::Rm(args) => records::handle_remove(&ctx, args)?,
        Commands::Generate(args) => generate::handle_generate(&ctx, args)?,
        Commands::Export(args) => transfer::handle_export(&ctx, args)?,
        Commands::Import(args) => transfer::handle_import(&ctx, args)?,
        Commands::Algorithm(args) => vault::handle_algorithm(&ctx, args)?,
        Commands::Passwd(args) => vault::handle_passwd(&ctx, args)?,
        Commands::Completions(args) => misc::handle_completions(args)?,
    }
    Ok(())
}
