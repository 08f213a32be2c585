//! Records and the working copy used to edit them.

use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;

use super::field::{FieldEntry, FieldKind};
use crate::error::{Result, StoreError};
use crate::generator::{Generated, Generator, PasswordStyle};

/// A named, versioned list of fields.
///
/// The id is fixed at creation. `version` starts at 0 and grows by one on
/// every save made through the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    id: String,
    version: u64,
    fields: Vec<FieldEntry>,
}

impl Record {
    pub(crate) fn from_parts(id: String, version: u64, fields: Vec<FieldEntry>) -> Self {
        Self {
            id,
            version,
            fields,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn fields(&self) -> &[FieldEntry] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldEntry> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Case-insensitive substring match on the id, field names and values.
    /// `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.id.to_lowercase().contains(needle)
            || self.fields.iter().any(|field| {
                field.name.to_lowercase().contains(needle)
                    || field.value.to_lowercase().contains(needle)
            })
    }

    pub(crate) fn replace_fields(&mut self, fields: Vec<FieldEntry>) {
        self.fields = fields;
        self.version += 1;
    }
}

/// Check the field-list invariants of record `record`.
pub(crate) fn validate_fields(
    record: &str,
    fields: &[FieldEntry],
) -> std::result::Result<(), StoreError> {
    let mut seen = HashSet::with_capacity(fields.len());
    for field in fields {
        if field.name.trim().is_empty() {
            return Err(StoreError::EmptyFieldName);
        }
        if !seen.insert(field.name.as_str()) {
            return Err(StoreError::DuplicateFieldName {
                record: record.to_string(),
                field: field.name.clone(),
            });
        }
    }
    Ok(())
}

/// Working copy of a record, saved in one go with
/// [`RecordStore::commit`](super::RecordStore::commit).
///
/// The draft remembers the version it was taken from; committing it after
/// somebody else saved the record fails with `VersionConflict`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    id: String,
    base_version: u64,
    fields: Vec<FieldEntry>,
}

impl RecordDraft {
    pub(crate) fn of(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            base_version: record.version,
            fields: record.fields.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn base_version(&self) -> u64 {
        self.base_version
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldEntry> {
        self.fields.iter()
    }

    pub fn field(&self, name: &str) -> Option<&FieldEntry> {
        self.fields().find(|field| field.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn position(&self, name: &str) -> std::result::Result<usize, StoreError> {
        self.fields
            .iter()
            .position(|field| field.name == name)
            .ok_or_else(|| StoreError::FieldNotFound {
                record: self.id.clone(),
                field: name.to_string(),
            })
    }

    fn ensure_free_name(&self, name: &str) -> std::result::Result<(), StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::EmptyFieldName);
        }
        if self.fields.iter().any(|field| field.name == name) {
            return Err(StoreError::DuplicateFieldName {
                record: self.id.clone(),
                field: name.to_string(),
            });
        }
        Ok(())
    }

    pub fn set_value(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> std::result::Result<(), StoreError> {
        let index = self.position(name)?;
        self.fields[index].value = value.into();
        Ok(())
    }

    pub fn set_kind(&mut self, name: &str, kind: FieldKind) -> std::result::Result<(), StoreError> {
        let index = self.position(name)?;
        self.fields[index].change_kind(kind);
        Ok(())
    }

    /// Rename a field, reclassifying it per [`FieldKind::after_rename`].
    /// Returns the resulting kind. The value is untouched.
    pub fn rename_field(
        &mut self,
        old: &str,
        new: &str,
    ) -> std::result::Result<FieldKind, StoreError> {
        let index = self.position(old)?;
        if old == new {
            return Ok(self.fields[index].kind);
        }
        self.ensure_free_name(new)?;

        Ok(self.fields[index].rename(new))
    }

    /// Append a field. Without an explicit kind, one is inferred from the
    /// name and value.
    pub fn add_field(
        &mut self,
        name: &str,
        value: impl Into<String>,
        kind: Option<FieldKind>,
    ) -> std::result::Result<(), StoreError> {
        self.ensure_free_name(name)?;
        let value = value.into();
        let kind = kind.unwrap_or_else(|| FieldKind::infer(name, &value));
        self.fields.push(FieldEntry::new(name, value, kind));
        Ok(())
    }

    pub fn remove_field(&mut self, name: &str) -> std::result::Result<FieldEntry, StoreError> {
        let index = self.position(name)?;
        Ok(self.fields.remove(index))
    }

    /// Swap a field with the one after it. The last field stays put.
    /// Returns the field's new position.
    pub fn move_field_down(&mut self, name: &str) -> std::result::Result<usize, StoreError> {
        let index = self.position(name)?;
        if index + 1 < self.fields.len() {
            self.fields.swap(index, index + 1);
            Ok(index + 1)
        } else {
            Ok(index)
        }
    }

    /// Move the field at `from` so it ends up at `to`.
    pub fn move_field(&mut self, from: usize, to: usize) -> std::result::Result<(), StoreError> {
        let len = self.fields.len();
        for index in [from, to] {
            if index >= len {
                return Err(StoreError::PositionOutOfRange { index, len });
            }
        }
        let field = self.fields.remove(from);
        self.fields.insert(to, field);
        Ok(())
    }

    /// Replace a password field's value with a freshly generated password.
    ///
    /// # Errors
    ///
    /// `NotPasswordField` unless the field has kind `password`; generator
    /// errors pass through and leave the field unchanged.
    pub fn regenerate<R: Rng + ?Sized>(
        &mut self,
        name: &str,
        style: PasswordStyle,
        generator: &Generator,
        rng: &mut R,
    ) -> Result<Generated> {
        let index = self.position(name)?;
        if !self.fields[index].is_password() {
            return Err(StoreError::NotPasswordField(name.to_string()).into());
        }
        let generated = generator.generate(style, rng)?;
        self.fields[index].value = generated.password.clone();
        Ok(generated)
    }

    pub(crate) fn into_entries(self) -> Vec<FieldEntry> {
        self.fields
    }
}
