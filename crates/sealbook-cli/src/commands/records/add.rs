use rand::rngs::OsRng;

use sealbook_core::store::PASSWORD_FIELD_NAME;
use sealbook_core::FieldEntry;

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::errors::CliError;
use crate::helpers::{parse_assignment, parse_kind, parse_style};
use crate::ui::receipt;

/// Fields in command-line order, with explicit kinds applied.
fn build_fields(args: &AddArgs) -> anyhow::Result<Vec<FieldEntry>> {
    let mut fields = Vec::with_capacity(args.fields.len() + 1);
    for raw in &args.fields {
        let (name, value) = parse_assignment(raw, '=', "field")?;
        fields.push(FieldEntry::inferred(name, value));
    }
    for raw in &args.kinds {
        let (name, kind) = parse_assignment(raw, '=', "kind")?;
        let kind = parse_kind(kind)?;
        let field = fields
            .iter_mut()
            .find(|field| field.name == name)
            .ok_or_else(|| {
                CliError::invalid_input(format!("--kind names unknown field '{}'", name))
            })?;
        field.kind = kind;
    }
    Ok(fields)
}

/// True when a field would collide with the generated `password` field.
fn has_password_name(fields: &[FieldEntry]) -> bool {
    fields
        .iter()
        .any(|field| field.name.trim().eq_ignore_ascii_case(PASSWORD_FIELD_NAME))
}

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let mut fields = build_fields(args)?;
    let style = args.generate.as_deref().map(parse_style).transpose()?;
    if style.is_some() && has_password_name(&fields) {
        return Err(CliError::invalid_input(
            "Both --field password=... and --generate were given; pick one",
        )
        .into());
    }

    let ui = ctx.ui_context(false);
    let (mut session, path) = ctx.open_session(&ui)?;

    let generated = match style {
        Some(style) => {
            let generated = ctx.generator().generate(style, &mut OsRng)?;
            fields.push(FieldEntry::inferred(PASSWORD_FIELD_NAME, &generated.password));
            Some(generated)
        }
        None => None,
    };

    let (id, version, count) = {
        let record = session.records_mut().create(&args.id, fields)?;
        (record.id().to_string(), record.version(), record.fields().len())
    };
    ctx.save_session(&session, &path)?;

    if !ctx.quiet() {
        let version = version.to_string();
        let count = count.to_string();
        let mut items = vec![
            ("Id", id.as_str()),
            ("Version", version.as_str()),
            ("Fields", count.as_str()),
        ];
        let report = generated
            .as_ref()
            .map(|g| format!("{} chars, {:.1} bits", g.char_count, g.entropy_bits));
        if let Some(report) = report.as_deref() {
            items.push(("Generated", report));
        }
        println!("{}", receipt(&ui, "Record added", &items));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sealbook_core::FieldKind;

    fn args(fields: &[&str], kinds: &[&str]) -> AddArgs {
        AddArgs {
            id: "mail".to_string(),
            fields: fields.iter().map(|s| s.to_string()).collect(),
            kinds: kinds.iter().map(|s| s.to_string()).collect(),
            generate: None,
        }
    }

    #[test]
    fn test_build_fields_keeps_order_and_infers_kinds() {
        let fields = build_fields(&args(
            &[
                "url=https://mail.example.org",
                "username=bilbo",
                "password=ring",
            ],
            &[],
        ))
        .unwrap();
        let summary: Vec<(&str, FieldKind)> =
            fields.iter().map(|f| (f.name.as_str(), f.kind)).collect();
        assert_eq!(
            summary,
            vec![
                ("url", FieldKind::Url),
                ("username", FieldKind::Text),
                ("password", FieldKind::Password)
            ]
        );
    }

    #[test]
    fn test_build_fields_applies_explicit_kind() {
        let fields = build_fields(&args(&["pin=1234"], &["pin=password"])).unwrap();
        assert_eq!(fields[0].kind, FieldKind::Password);
    }

    #[test]
    fn test_generate_conflict_ignores_case() {
        for name in ["password", "Password", "PASSWORD"] {
            let field = format!("{}=x", name);
            let fields = build_fields(&args(&[field.as_str()], &[])).unwrap();
            assert!(has_password_name(&fields), "{}", name);
        }
        let fields = build_fields(&args(&["passwords=x", "pin=1"], &[])).unwrap();
        assert!(!has_password_name(&fields));
    }

    #[test]
    fn test_kind_for_unknown_field_is_rejected() {
        let err = build_fields(&args(&["pin=1234"], &["otp=password"])).unwrap_err();
        assert!(err.to_string().contains("unknown field 'otp'"));
    }
}
