use rand::rngs::OsRng;
use serde_json::json;

use sealbook_core::{Generator, PasswordStyle};

use crate::app::AppContext;
use crate::cli::GenerateArgs;
use crate::errors::CliError;
use crate::ui::theme::{styled, styles};

/// Configured generator with command-line overrides applied.
fn configure(base: Generator, args: &GenerateArgs) -> anyhow::Result<(Generator, PasswordStyle)> {
    let mut generator = base;
    let style = if args.memorable {
        PasswordStyle::Memorable
    } else {
        PasswordStyle::Cryptic
    };

    match style {
        PasswordStyle::Cryptic => {
            if let Some(alphabet) = &args.alphabet {
                generator.cryptic.alphabet = alphabet.clone();
            }
            if let Some(min) = args.min {
                generator.cryptic.min_len = min;
            }
            if let Some(max) = args.max {
                generator.cryptic.max_len = max;
            }
        }
        PasswordStyle::Memorable => {
            if args.alphabet.is_some() {
                return Err(CliError::invalid_input(
                    "--alphabet only applies to cryptic passwords",
                )
                .into());
            }
            if let Some(min) = args.min {
                generator.memorable.min_len = min;
            }
            if let Some(max) = args.max {
                generator.memorable.max_len = max;
            }
        }
    }
    Ok((generator, style))
}

pub fn handle_generate(ctx: &AppContext, args: &GenerateArgs) -> anyhow::Result<()> {
    if args.count == 0 {
        return Err(CliError::invalid_input("--count must be at least 1").into());
    }
    let ui = ctx.ui_context(args.json);
    let (generator, style) = configure(ctx.generator(), args)?;

    let mut passwords = Vec::with_capacity(args.count);
    for _ in 0..args.count {
        passwords.push(generator.generate(style, &mut OsRng)?);
    }

    if ui.mode.is_json() {
        let items: Vec<_> = passwords
            .iter()
            .map(|g| {
                json!({
                    "password": g.password,
                    "chars": g.char_count,
                    "entropy_bits": g.entropy_bits,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    for generated in &passwords {
        if ui.mode.is_pretty() && !ctx.quiet() {
            let report = format!(
                "({} chars, {:.1} bits)",
                generated.char_count, generated.entropy_bits
            );
            println!(
                "{}  {}",
                generated.password,
                styled(&report, styles::dim(), ui.color)
            );
        } else {
            println!("{}", generated.password);
        }
    }
    Ok(())
}
