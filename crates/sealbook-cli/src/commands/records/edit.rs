use rand::rngs::OsRng;

use sealbook_core::error::StoreError;
use sealbook_core::{Generated, Generator, PasswordStyle, RecordDraft};

use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::errors::CliError;
use crate::helpers::{parse_assignment, parse_generate_target, parse_move};
use crate::ui::receipt;

fn has_changes(args: &EditArgs) -> bool {
    !(args.set.is_empty()
        && args.rename.is_empty()
        && args.remove.is_empty()
        && args.move_down.is_empty()
        && args.move_to.is_empty()
        && args.generate.is_empty())
}

/// Apply every requested change to the draft, in a fixed order: renames,
/// sets, removals, moves, then regenerations.
fn apply_changes(
    draft: &mut RecordDraft,
    args: &EditArgs,
    generator: &Generator,
    default_style: PasswordStyle,
) -> anyhow::Result<Vec<(String, Generated)>> {
    for raw in &args.rename {
        let (old, new) = parse_assignment(raw, '=', "rename")?;
        draft.rename_field(old, new.trim())?;
    }
    for raw in &args.set {
        let (name, value) = parse_assignment(raw, '=', "field")?;
        if draft.field(name).is_some() {
            draft.set_value(name, value)?;
        } else {
            draft.add_field(name, value, None)?;
        }
    }
    for name in &args.remove {
        draft.remove_field(name)?;
    }
    for name in &args.move_down {
        draft.move_field_down(name)?;
    }
    for raw in &args.move_to {
        let (from, to) = parse_move(raw)?;
        draft.move_field(from, to)?;
    }

    let mut generated = Vec::new();
    for raw in &args.generate {
        let (name, style) = parse_generate_target(raw, default_style)?;
        let report = draft.regenerate(&name, style, generator, &mut OsRng)?;
        generated.push((name, report));
    }
    Ok(generated)
}

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    if !has_changes(args) {
        return Err(CliError::invalid_input(
            "Nothing to change\n\
             Hint: Use --set, --rename, --remove, --move-down, --move or --generate.",
        )
        .into());
    }

    let ui = ctx.ui_context(false);
    let (mut session, path) = ctx.open_session(&ui)?;

    let mut draft = session.records().edit(&args.id)?;
    if let Some(expected) = args.expected_version {
        if expected != draft.base_version() {
            return Err(StoreError::VersionConflict {
                id: args.id.clone(),
                expected,
                actual: draft.base_version(),
            }
            .into());
        }
    }
    let generated = apply_changes(&mut draft, args, &ctx.generator(), ctx.default_style())?;

    let version = session.records_mut().commit(draft)?.version();
    ctx.save_session(&session, &path)?;

    if !ctx.quiet() {
        let version = version.to_string();
        let reports: Vec<(String, String)> = generated
            .iter()
            .map(|(name, g)| {
                (
                    format!("Generated {}", name),
                    format!("{} chars, {:.1} bits", g.char_count, g.entropy_bits),
                )
            })
            .collect();
        let mut items = vec![("Id", args.id.as_str()), ("Version", version.as_str())];
        items.extend(reports.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        println!("{}", receipt(&ui, "Record saved", &items));
    }
    Ok(())
}
