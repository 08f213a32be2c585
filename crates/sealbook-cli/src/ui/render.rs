//! Text output for commands, in pretty or plain form.
//!
//! Every function returns a `String`; callers decide between stdout and
//! stderr. Plain output is line-oriented `key=value` so scripts can parse it.

use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, NOTHING, UTF8_FULL};
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use super::context::UiContext;
use super::mode::OutputMode;
use super::theme::{styled, styles, Badge};

/// Longest vault path shown in a header before the front is elided.
const MAX_PATH_CHARS: usize = 50;

/// Table decoration in pretty mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLook {
    /// Rounded box, for a single record's fields.
    Boxed,
    /// No borders, dim headings, for record lists.
    Bare,
}

fn shorten_path(path: &Path) -> String {
    let text = path.to_string_lossy();
    let len = text.chars().count();
    if len <= MAX_PATH_CHARS {
        return text.into_owned();
    }
    let keep = MAX_PATH_CHARS - 3;
    let tail: String = text.chars().skip(len - keep).collect();
    format!("...{}", tail)
}

/// First lines of a command's output: "Sealbook · list" and the vault in use.
///
/// Plain mode prints `sealbook list` and leaves the path out.
pub fn header(ctx: &UiContext, command: &str, vault: Option<&Path>) -> String {
    match ctx.mode {
        OutputMode::Json => String::new(),
        OutputMode::Plain => format!("sealbook {}", command),
        OutputMode::Pretty => {
            let name = styled("Sealbook", styles::bold(), ctx.color);
            match vault {
                Some(path) => format!(
                    "{} \u{00B7} {}\n{}",
                    name,
                    command,
                    kv(ctx, "Vault", &shorten_path(path))
                ),
                None => format!("{} \u{00B7} {}", name, command),
            }
        }
    }
}

pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let mark = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    match message {
        "" => mark,
        text => format!("{} {}", mark, text),
    }
}

/// `Key: value` on a terminal, `key=value` otherwise.
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if !ctx.mode.is_pretty() {
        let key = key.to_lowercase().replace(' ', "_");
        return format!("{}={}", key, value);
    }
    format!(
        "{} {}",
        styled(&format!("{}:", key), styles::dim(), ctx.color),
        value
    )
}

pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", styled("Hint:", styles::dim(), ctx.color), text)
    } else {
        format!("hint={}", text)
    }
}

/// Summary printed after a change to the vault.
///
/// Pretty mode shows an OK badge over indented fields; plain mode starts
/// with `status=ok`.
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, &str)]) -> String {
    let (first, indent) = if ctx.mode.is_pretty() {
        (badge(ctx, Badge::Ok, title), "  ")
    } else {
        ("status=ok".to_string(), "")
    };
    std::iter::once(first)
        .chain(
            items
                .iter()
                .map(|(key, value)| format!("{}{}", indent, kv(ctx, key, value))),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rows as a comfy-table on a terminal, tab-separated lines elsewhere.
///
/// Plain output has no heading row.
pub fn table(ctx: &UiContext, look: TableLook, headings: &[&str], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut out = Table::new();
    out.set_content_arrangement(ContentArrangement::Dynamic);
    match look {
        TableLook::Boxed => {
            if ctx.unicode {
                out.load_preset(UTF8_FULL)
                    .apply_modifier(UTF8_ROUND_CORNERS);
            } else {
                out.load_preset(ASCII_MARKDOWN);
            }
            out.set_width(ctx.width as u16);
            out.set_header(headings.to_vec());
        }
        TableLook::Bare => {
            out.load_preset(NOTHING);
            out.set_header(headings.iter().map(|heading| {
                let cell = Cell::new(heading);
                if ctx.color {
                    cell.add_attribute(Attribute::Dim)
                } else {
                    cell
                }
            }));
            for column in out.column_iter_mut() {
                column.set_padding((0, 2));
            }
        }
    }
    for row in rows {
        out.add_row(row);
    }
    out.to_string()
}

/// Error text for stderr, with the hint on its own line.
pub fn error_block(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = if ctx.mode.is_pretty() {
        vec![badge(ctx, Badge::Err, message)]
    } else {
        vec![format!("error={}", message)]
    };
    if let Some(text) = error_hint {
        lines.push(hint(ctx, text));
    }
    lines.join("\n")
}

pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_block(ctx, message, error_hint));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(mode: OutputMode) -> UiContext {
        UiContext {
            is_tty: mode == OutputMode::Pretty,
            color: false,
            unicode: true,
            width: 80,
            mode,
        }
    }

    #[test]
    fn test_header_names_vault_on_terminal() {
        let h = header(
            &ctx(OutputMode::Pretty),
            "list",
            Some(Path::new("/tmp/vault.sealbook")),
        );
        assert!(h.starts_with("Sealbook \u{00B7} list"));
        assert!(h.ends_with("Vault: /tmp/vault.sealbook"));

        let plain = header(&ctx(OutputMode::Plain), "list", None);
        assert_eq!(plain, "sealbook list");
        assert!(header(&ctx(OutputMode::Json), "list", None).is_empty());
    }

    #[test]
    fn test_long_vault_path_keeps_file_name() {
        let path = format!("/home/{}/vault.sealbook", "x".repeat(80));
        let shown = shorten_path(Path::new(&path));
        assert_eq!(shown.chars().count(), MAX_PATH_CHARS);
        assert!(shown.starts_with("...x"));
        assert!(shown.ends_with("vault.sealbook"));
    }

    #[test]
    fn test_badge_without_message() {
        let plain = ctx(OutputMode::Plain);
        assert_eq!(
            badge(&plain, Badge::Ok, "Deleted mail"),
            "[\u{2713}] Deleted mail"
        );
        assert_eq!(badge(&plain, Badge::Info, ""), "[\u{2139}]");
    }

    #[test]
    fn test_kv_modes() {
        let plain = ctx(OutputMode::Plain);
        assert_eq!(kv(&plain, "Record Id", "mail"), "record_id=mail");
        let pretty = ctx(OutputMode::Pretty);
        assert_eq!(kv(&pretty, "Record Id", "mail"), "Record Id: mail");
    }

    #[test]
    fn test_receipt_modes() {
        let items = [("Id", "mail"), ("Version", "2")];
        assert_eq!(
            receipt(&ctx(OutputMode::Plain), "Record saved", &items),
            "status=ok\nid=mail\nversion=2"
        );
        let pretty = receipt(&ctx(OutputMode::Pretty), "Record saved", &items);
        assert_eq!(pretty.lines().count(), 3);
        assert!(pretty.lines().nth(1).unwrap().starts_with("  Id: "));
    }

    #[test]
    fn test_plain_table_is_tab_separated() {
        let rows = vec![vec!["Home wifi".to_string(), "2".to_string()]];
        for look in [TableLook::Boxed, TableLook::Bare] {
            assert_eq!(
                table(&ctx(OutputMode::Plain), look, &["ID", "VER"], &rows),
                "Home wifi\t2"
            );
        }
    }

    #[test]
    fn test_pretty_tables_show_headings() {
        let rows = vec![vec!["mail".to_string(), "4".to_string()]];
        let pretty = ctx(OutputMode::Pretty);
        let boxed = table(&pretty, TableLook::Boxed, &["ID", "VER"], &rows);
        assert!(boxed.contains("ID"));
        assert!(boxed.contains("mail"));
        let bare = table(&pretty, TableLook::Bare, &["ID", "VER"], &rows);
        assert!(bare.contains("VER"));
        assert!(!bare.contains('\u{2502}'));
    }

    #[test]
    fn test_error_block_plain() {
        let plain = ctx(OutputMode::Plain);
        let msg = error_block(&plain, "Wrong master password", Some("retry"));
        assert_eq!(msg, "error=Wrong master password\nhint=retry");
    }
}
