//! Import and export of vault contents.

use std::path::Path;

use dialoguer::Confirm;

use sealbook_core::crypto::looks_sealed;
use sealbook_core::example::EXAMPLE_DOCUMENT;
use sealbook_core::fs::write_atomic;

use crate::app::AppContext;
use crate::cli::{ExportArgs, ImportArgs};
use crate::errors::CliError;
use crate::helpers::read_source;
use crate::ui::{badge, receipt, Badge};

pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false);
    let (session, _path) = ctx.open_session(&ui)?;
    let text = if args.plain {
        session.export_plain()?
    } else {
        session.seal()?
    };

    match args.output.as_deref() {
        Some(output) => {
            write_atomic(Path::new(output), text.as_bytes())
                .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", output, e))?;
            tracing::info!(output, plain = args.plain, "exported vault");
            if !ctx.quiet() {
                let records = session.records().len().to_string();
                let kind = if args.plain { "plaintext" } else { "sealed" };
                println!(
                    "{}",
                    receipt(
                        &ui,
                        "Exported",
                        &[
                            ("File", output),
                            ("Records", records.as_str()),
                            ("Kind", kind),
                        ],
                    )
                );
                if args.plain {
                    let warning = "This file is not encrypted. Delete it when done.";
                    println!("{}", badge(&ui, Badge::Warn, warning));
                }
            }
        }
        None => {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

fn confirm_replace(ctx: &AppContext, existing: usize) -> anyhow::Result<bool> {
    if existing == 0 || !ctx.interactive() {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(format!(
            "Replace all {} records with the imported document?",
            existing
        ))
        .default(false)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}

pub fn handle_import(ctx: &AppContext, args: &ImportArgs) -> anyhow::Result<()> {
    let text = if args.example {
        EXAMPLE_DOCUMENT.to_string()
    } else {
        let source = args.source.as_deref().ok_or_else(|| {
            CliError::invalid_input(
                "Nothing to import\n\
                 Hint: Pass a file, - for stdin, or --example.",
            )
        })?;
        read_source(source)?
    };
    if looks_sealed(&text) {
        return Err(CliError::invalid_input(
            "This is sealed text, not a plaintext document\n\
             Hint: Open it with `sealbook --vault <file> export --plain` first.",
        )
        .into());
    }

    let ui = ctx.ui_context(false);
    let (mut session, path) = ctx.open_session(&ui)?;

    if args.merge {
        let report = session.merge_from_text(&text)?;
        ctx.save_session(&session, &path)?;
        if !ctx.quiet() {
            let added = report.added.len().to_string();
            let skipped = report.skipped.join(", ");
            let mut items = vec![("Added", added.as_str())];
            if !report.skipped.is_empty() {
                items.push(("Skipped", skipped.as_str()));
            }
            println!("{}", receipt(&ui, "Merged", &items));
        }
        return Ok(());
    }

    if !confirm_replace(ctx, session.records().len())? {
        println!("{}", badge(&ui, Badge::Info, "Nothing imported"));
        return Ok(());
    }
    session.replace_from_text(&text)?;
    ctx.save_session(&session, &path)?;
    if !ctx.quiet() {
        let records = session.records().len().to_string();
        let algorithm = session.algorithm().to_string();
        println!(
            "{}",
            receipt(
                &ui,
                "Imported",
                &[
                    ("Records", records.as_str()),
                    ("Algorithm", algorithm.as_str()),
                ],
            )
        );
    }
    Ok(())
}
