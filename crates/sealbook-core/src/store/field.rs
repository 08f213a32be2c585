//! Typed record fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a field's value is treated.
///
/// Adding a variant is the extension point; the id strings are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    /// Masked by default; generator actions apply.
    Password,
    /// Multi-line free text.
    Notes,
    Url,
}

/// Field name that turns a field into a password field.
pub const PASSWORD_FIELD_NAME: &str = "password";

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Text,
        FieldKind::Password,
        FieldKind::Notes,
        FieldKind::Url,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Password => "password",
            FieldKind::Notes => "notes",
            FieldKind::Url => "url",
        }
    }

    /// Kind for a field created without an explicit kind.
    pub fn infer(name: &str, value: &str) -> FieldKind {
        let lower = name.trim().to_ascii_lowercase();
        if lower == PASSWORD_FIELD_NAME {
            FieldKind::Password
        } else if lower == "notes" || value.contains('\n') {
            FieldKind::Notes
        } else if lower == "url" || lower.starts_with("url-") {
            FieldKind::Url
        } else {
            FieldKind::Text
        }
    }

    /// Kind after renaming a field of kind `current` to `new_name`.
    ///
    /// - `password` (any case) makes it a password field;
    /// - leaving `password` restores `before_password` if known, otherwise
    ///   `notes` for multi-line values and `text` for the rest;
    /// - any other rename keeps the current kind.
    pub fn after_rename(
        current: FieldKind,
        new_name: &str,
        before_password: Option<FieldKind>,
        value: &str,
    ) -> FieldKind {
        if new_name.trim().eq_ignore_ascii_case(PASSWORD_FIELD_NAME) {
            return FieldKind::Password;
        }
        if current != FieldKind::Password {
            return current;
        }
        match before_password {
            Some(kind) if kind != FieldKind::Password => kind,
            _ if value.contains('\n') => FieldKind::Notes,
            _ => FieldKind::Text,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// One named value inside a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub name: String,
    pub value: String,
    pub kind: FieldKind,
    /// Kind the field had before it became a password field. Persisted so a
    /// rename back out of `password` restores it in a later save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior_kind: Option<FieldKind>,
}

impl FieldEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind,
            prior_kind: None,
        }
    }

    /// Field whose kind is inferred from its name and value.
    pub fn inferred(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        let kind = FieldKind::infer(&name, &value);
        Self::new(name, value, kind)
    }

    pub fn is_password(&self) -> bool {
        self.kind == FieldKind::Password
    }

    /// Change the kind, remembering the old one when entering `password`.
    pub(crate) fn change_kind(&mut self, kind: FieldKind) {
        if kind == FieldKind::Password {
            if self.kind != FieldKind::Password {
                self.prior_kind = Some(self.kind);
            }
        } else {
            self.prior_kind = None;
        }
        self.kind = kind;
    }

    /// Rename and reclassify per [`FieldKind::after_rename`].
    pub(crate) fn rename(&mut self, new_name: &str) -> FieldKind {
        let kind = FieldKind::after_rename(self.kind, new_name, self.prior_kind, &self.value);
        self.change_kind(kind);
        self.name = new_name.to_string();
        kind
    }
}
