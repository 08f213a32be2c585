use std::path::PathBuf;
use std::str::FromStr;

use sealbook_core::{CipherAlgorithm, KdfStrength, Session};

use crate::app::{run_cancellable, AppContext};
use crate::cli::InitArgs;
use crate::config::{write_config, SealbookConfig};
use crate::constants::PASSWORD_ENV;
use crate::errors::CliError;
use crate::helpers::prompt_new_password;
use crate::ui::{header, hint, receipt};

pub fn parse_algorithm(raw: &str) -> anyhow::Result<CipherAlgorithm> {
    CipherAlgorithm::from_str(raw).map_err(|_| {
        let known: Vec<&str> = CipherAlgorithm::ALL.iter().map(|a| a.id()).collect();
        CliError::invalid_input(format!(
            "Unknown algorithm '{}' (supported: {})",
            raw.trim(),
            known.join(", ")
        ))
        .into()
    })
}

pub fn parse_strength(raw: &str) -> anyhow::Result<KdfStrength> {
    KdfStrength::from_str(raw).map_err(|e| CliError::invalid_input(e.to_string()).into())
}

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false);
    let path = match args.path.as_deref() {
        Some(p) => PathBuf::from(p),
        None => ctx.vault_path()?,
    };
    if path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "A vault already exists at {}\nHint: Pass --force to overwrite it.",
            path.display()
        ))
        .into());
    }

    let algorithm = match args.algorithm.as_deref() {
        Some(raw) => parse_algorithm(raw)?,
        None => ctx.config().security.algorithm,
    };
    let strength = match args.strength.as_deref() {
        Some(raw) => parse_strength(raw)?,
        None => ctx.config().security.kdf_strength,
    };

    if !ctx.quiet() {
        println!("{}", header(&ui, "init", Some(path.as_path())));
    }
    let password = prompt_new_password(PASSWORD_ENV, ctx.interactive())?;
    let title = args.title.clone();
    let session = run_cancellable(&ui, "Deriving key", move |_| {
        Session::create(&password, strength, algorithm, title)
    })?;
    ctx.save_session(&session, &path)?;

    let config_path = ctx.config_path();
    let wrote_config = !config_path.exists();
    if wrote_config {
        let config = SealbookConfig::new(&path, algorithm, strength);
        write_config(config_path, &config)?;
    }

    if !ctx.quiet() {
        let path_text = path.to_string_lossy();
        let algorithm_text = algorithm.to_string();
        let strength_text = format!("{:?}", strength).to_lowercase();
        println!(
            "{}",
            receipt(
                &ui,
                "Vault created",
                &[
                    ("Path", &*path_text),
                    ("Algorithm", algorithm_text.as_str()),
                    ("Strength", strength_text.as_str()),
                ],
            )
        );
        if wrote_config {
            println!("{}", hint(&ui, &format!("Config written to {}", config_path.display())));
        }
        println!("{}", hint(&ui, "sealbook add <id> -f username=... --generate cryptic"));
    }
    Ok(())
}
