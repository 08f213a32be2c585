use serde_json::json;

use sealbook_core::Record;

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::helpers::format_timestamp;
use crate::ui::{header, hint, kv, table, TableLook};

fn field_names(record: &Record) -> String {
    record
        .fields()
        .iter()
        .map(|field| field.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json);
    let (session, path) = ctx.open_session(&ui)?;

    let mut records = session.records().list(args.filter.as_deref());
    if args.sort {
        records.sort_by_cached_key(|record| record.id().to_lowercase());
    }

    if ui.mode.is_json() {
        let items: Vec<_> = records
            .iter()
            .map(|record| {
                json!({
                    "id": record.id(),
                    "version": record.version(),
                    "fields": record.fields().iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if ui.mode.is_pretty() && !ctx.quiet() {
        println!("{}", header(&ui, "list", Some(path.as_path())));
        let meta = &session.database().meta;
        if let Some(title) = meta.title.as_deref() {
            println!("{}", kv(&ui, "Title", title));
        }
        println!("{}", kv(&ui, "Modified", &format_timestamp(&meta.modified_at)));
    }
    if records.is_empty() {
        if !ctx.quiet() {
            let text = match args.filter.as_deref() {
                Some(filter) => format!("No records match '{}'", filter),
                None => "Vault is empty. Add one with `sealbook add <id>`".to_string(),
            };
            println!("{}", hint(&ui, &text));
        }
        return Ok(());
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            vec![
                record.id().to_string(),
                record.version().to_string(),
                field_names(record),
            ]
        })
        .collect();
    println!("{}", table(&ui, TableLook::Bare, &["ID", "VER", "FIELDS"], &rows));
    Ok(())
}
