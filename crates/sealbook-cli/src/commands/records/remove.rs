use dialoguer::Confirm;

use crate::app::AppContext;
use crate::cli::RmArgs;
use crate::errors::CliError;
use crate::ui::{badge, Badge};

pub fn handle_remove(ctx: &AppContext, args: &RmArgs) -> anyhow::Result<()> {
    if !args.yes && !ctx.interactive() {
        return Err(CliError::invalid_input(
            "Refusing to delete without confirmation\n\
             Hint: Pass --yes when running non-interactively.",
        )
        .into());
    }

    let ui = ctx.ui_context(false);
    let (mut session, path) = ctx.open_session(&ui)?;
    session.records().fetch(&args.id)?;

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete record '{}'?", args.id))
            .default(false)
            .interact()
            .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))?;
        if !confirmed {
            println!("{}", badge(&ui, Badge::Info, "Nothing deleted"));
            return Ok(());
        }
    }

    session.records_mut().delete(&args.id)?;
    ctx.save_session(&session, &path)?;
    if !ctx.quiet() {
        println!("{}", badge(&ui, Badge::Ok, &format!("Deleted {}", args.id)));
    }
    Ok(())
}
