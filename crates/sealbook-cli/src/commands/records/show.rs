use serde_json::json;

use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::helpers::display_value;
use crate::ui::{header, kv, table, TableLook};

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json);
    let (session, path) = ctx.open_session(&ui)?;
    let record = session.records().fetch(&args.id)?;

    if ui.mode.is_json() {
        let fields: Vec<_> = record
            .fields()
            .iter()
            .map(|field| {
                json!({
                    "name": field.name,
                    "value": display_value(&field.value, field.kind, args.reveal),
                    "kind": field.kind,
                })
            })
            .collect();
        let out = json!({
            "id": record.id(),
            "version": record.version(),
            "fields": fields,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if ui.mode.is_pretty() && !ctx.quiet() {
        println!("{}", header(&ui, "show", Some(path.as_path())));
    }
    println!("{}", kv(&ui, "Id", record.id()));
    println!("{}", kv(&ui, "Version", &record.version().to_string()));

    if ui.mode.is_pretty() {
        let rows: Vec<Vec<String>> = record
            .fields()
            .iter()
            .map(|field| {
                vec![
                    field.name.clone(),
                    field.kind.to_string(),
                    display_value(&field.value, field.kind, args.reveal),
                ]
            })
            .collect();
        println!("{}", table(&ui, TableLook::Boxed, &["Field", "Kind", "Value"], &rows));
    } else {
        // Multi-line values are escaped so each field stays on one line.
        for field in record.fields() {
            let value = display_value(&field.value, field.kind, args.reveal);
            println!("{}\t{}\t{}", field.name, field.kind, value.replace('\n', "\\n"));
        }
    }
    Ok(())
}
