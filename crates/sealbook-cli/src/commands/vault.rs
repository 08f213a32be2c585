//! Vault-wide commands: cipher algorithm and master password.

use sealbook_core::CipherAlgorithm;

use crate::app::{run_cancellable, AppContext};
use crate::cli::{AlgorithmArgs, PasswdArgs};
use crate::helpers::prompt_new_password;
use crate::ui::{kv, receipt};

use super::init::{parse_algorithm, parse_strength};

pub fn handle_algorithm(ctx: &AppContext, args: &AlgorithmArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false);
    if args.list {
        for algorithm in CipherAlgorithm::ALL {
            let marker = if algorithm == ctx.config().security.algorithm {
                " (default)"
            } else {
                ""
            };
            println!("{}{}", algorithm, marker);
        }
        return Ok(());
    }

    let target = args.name.as_deref().map(parse_algorithm).transpose()?;
    let (session, path) = ctx.open_session(&ui)?;
    let from = session.algorithm();

    let Some(target) = target else {
        println!("{}", kv(&ui, "Algorithm", &from.to_string()));
        return Ok(());
    };
    if target == from {
        if !ctx.quiet() {
            println!("{}", kv(&ui, "Algorithm", &format!("{} (unchanged)", from)));
        }
        return Ok(());
    }

    let session = run_cancellable(&ui, "Re-encrypting vault", move |token| {
        let mut session = session;
        session.switch_algorithm(target, token)?;
        Ok(session)
    })?;
    ctx.save_session(&session, &path)?;

    if !ctx.quiet() {
        let from = from.to_string();
        let to = target.to_string();
        println!(
            "{}",
            receipt(
                &ui,
                "Algorithm switched",
                &[("From", from.as_str()), ("To", to.as_str())]
            )
        );
    }
    Ok(())
}

pub fn handle_passwd(ctx: &AppContext, args: &PasswdArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false);
    let strength = match args.strength.as_deref() {
        Some(raw) => parse_strength(raw)?,
        None => ctx.config().security.kdf_strength,
    };
    let (session, path) = ctx.open_session(&ui)?;
    let new_password = prompt_new_password(&args.new_password_env, ctx.interactive())?;

    let session = run_cancellable(&ui, "Deriving new key", move |_| {
        let mut session = session;
        session.change_password(&new_password, strength)?;
        Ok(session)
    })?;
    ctx.save_session(&session, &path)?;

    if !ctx.quiet() {
        let path = path.to_string_lossy();
        println!("{}", receipt(&ui, "Master password changed", &[("Vault", &*path)]));
    }
    Ok(())
}
