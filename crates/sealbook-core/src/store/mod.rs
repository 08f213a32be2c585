//! In-memory record store with optimistic versioning.
//!
//! Every mutating call that touches an existing record takes the version the
//! caller last saw. If the record has been saved since, the call fails with
//! [`StoreError::VersionConflict`] and nothing changes. Single-field
//! operations are shorthands for `edit` + one draft change + `commit`, so
//! each of them is exactly one save.

mod field;
mod record;

pub use field::{FieldEntry, FieldKind, PASSWORD_FIELD_NAME};
pub use record::{Record, RecordDraft};

pub(crate) use record::validate_fields;

use crate::error::StoreError;

type StoreResult<T> = std::result::Result<T, StoreError>;

/// Ordered collection of records keyed by unique id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from records that were already validated.
    pub(crate) fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    fn require(&self, id: &str) -> StoreResult<usize> {
        self.index_of(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn require_version(&self, id: &str, expected: u64) -> StoreResult<usize> {
        let index = self.require(id)?;
        let actual = self.records[index].version();
        if actual != expected {
            tracing::debug!(id, expected, actual, "rejected stale save");
            return Err(StoreError::VersionConflict {
                id: id.to_string(),
                expected,
                actual,
            });
        }
        Ok(index)
    }

    /// Add a new record at version 0.
    pub fn create(&mut self, id: &str, fields: Vec<FieldEntry>) -> StoreResult<&Record> {
        if id.trim().is_empty() {
            return Err(StoreError::InvalidId);
        }
        if self.contains(id) {
            return Err(StoreError::DuplicateId(id.to_string()));
        }
        validate_fields(id, &fields)?;
        self.records
            .push(Record::from_parts(id.to_string(), 0, fields));
        tracing::debug!(id, "record created");
        Ok(&self.records[self.records.len() - 1])
    }

    /// Insert a record as-is, keeping its version.
    pub(crate) fn insert(&mut self, record: Record) -> StoreResult<()> {
        if self.contains(record.id()) {
            return Err(StoreError::DuplicateId(record.id().to_string()));
        }
        self.records.push(record);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Owned copy of a record.
    pub fn fetch(&self, id: &str) -> StoreResult<Record> {
        self.get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Records matching `filter` (case-insensitive, against the id and every
    /// field name and value), in store order. A missing or blank filter
    /// returns everything.
    pub fn list(&self, filter: Option<&str>) -> Vec<&Record> {
        match filter.map(str::trim).filter(|f| !f.is_empty()) {
            None => self.records.iter().collect(),
            Some(filter) => {
                let needle = filter.to_lowercase();
                self.records
                    .iter()
                    .filter(|record| record.matches(&needle))
                    .collect()
            }
        }
    }

    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(Record::id).collect()
    }

    /// Replace all fields of a record.
    pub fn update(
        &mut self,
        id: &str,
        expected_version: u64,
        fields: Vec<FieldEntry>,
    ) -> StoreResult<&Record> {
        let index = self.require_version(id, expected_version)?;
        validate_fields(id, &fields)?;
        let record = &mut self.records[index];
        record.replace_fields(fields);
        tracing::debug!(id, version = record.version(), "record updated");
        Ok(&*record)
    }

    pub fn delete(&mut self, id: &str) -> StoreResult<Record> {
        let index = self.require(id)?;
        tracing::debug!(id, "record deleted");
        Ok(self.records.remove(index))
    }

    /// Start editing a record at its current version.
    pub fn edit(&self, id: &str) -> StoreResult<RecordDraft> {
        let index = self.require(id)?;
        Ok(RecordDraft::of(&self.records[index]))
    }

    /// Save a draft as one new version.
    pub fn commit(&mut self, draft: RecordDraft) -> StoreResult<&Record> {
        let id = draft.id().to_string();
        let expected = draft.base_version();
        self.update(&id, expected, draft.into_entries())
    }

    fn edit_at(&self, id: &str, expected_version: u64) -> StoreResult<RecordDraft> {
        let index = self.require_version(id, expected_version)?;
        Ok(RecordDraft::of(&self.records[index]))
    }

    pub fn add_field(
        &mut self,
        id: &str,
        expected_version: u64,
        name: &str,
        value: &str,
        kind: Option<FieldKind>,
    ) -> StoreResult<&Record> {
        let mut draft = self.edit_at(id, expected_version)?;
        draft.add_field(name, value, kind)?;
        self.commit(draft)
    }

    pub fn remove_field(
        &mut self,
        id: &str,
        expected_version: u64,
        name: &str,
    ) -> StoreResult<&Record> {
        let mut draft = self.edit_at(id, expected_version)?;
        draft.remove_field(name)?;
        self.commit(draft)
    }

    pub fn rename_field(
        &mut self,
        id: &str,
        expected_version: u64,
        old: &str,
        new: &str,
    ) -> StoreResult<&Record> {
        let mut draft = self.edit_at(id, expected_version)?;
        draft.rename_field(old, new)?;
        self.commit(draft)
    }

    pub fn set_field_value(
        &mut self,
        id: &str,
        expected_version: u64,
        name: &str,
        value: &str,
    ) -> StoreResult<&Record> {
        let mut draft = self.edit_at(id, expected_version)?;
        draft.set_value(name, value)?;
        self.commit(draft)
    }

    pub fn move_field_down(
        &mut self,
        id: &str,
        expected_version: u64,
        name: &str,
    ) -> StoreResult<&Record> {
        let mut draft = self.edit_at(id, expected_version)?;
        draft.move_field_down(name)?;
        self.commit(draft)
    }

    pub fn move_field(
        &mut self,
        id: &str,
        expected_version: u64,
        from: usize,
        to: usize,
    ) -> StoreResult<&Record> {
        let mut draft = self.edit_at(id, expected_version)?;
        draft.move_field(from, to)?;
        self.commit(draft)
    }

    /// Move a record to position `to` in listing order.
    pub fn move_record(&mut self, id: &str, to: usize) -> StoreResult<()> {
        let from = self.require(id)?;
        let len = self.records.len();
        if to >= len {
            return Err(StoreError::PositionOutOfRange { index: to, len });
        }
        let record = self.records.remove(from);
        self.records.insert(to, record);
        Ok(())
    }

    /// Sort records by id, ignoring case. Stable for ids equal up to case.
    pub fn sort_by_id(&mut self) {
        self.records
            .sort_by_cached_key(|record| record.id().to_lowercase());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RecordStore {
        let mut store = RecordStore::new();
        store
            .create(
                "github",
                vec![
                    FieldEntry::inferred("username", "octo"),
                    FieldEntry::inferred("password", "hunter22"),
                ],
            )
            .unwrap();
        store
            .create("Bank", vec![FieldEntry::inferred("notes", "call on mondays")])
            .unwrap();
        store
    }

    #[test]
    fn test_create_starts_at_version_zero() {
        let store = store();
        assert_eq!(store.get("github").unwrap().version(), 0);
        assert_eq!(store.ids(), vec!["github", "Bank"]);
    }

    #[test]
    fn test_create_rejects_bad_ids_and_fields() {
        let mut store = store();
        assert_eq!(
            store.create("github", vec![]).unwrap_err(),
            StoreError::DuplicateId("github".to_string())
        );
        assert_eq!(
            store.create("  ", vec![]).unwrap_err(),
            StoreError::InvalidId
        );
        let dup = vec![
            FieldEntry::inferred("a", "1"),
            FieldEntry::inferred("a", "2"),
        ];
        assert!(matches!(
            store.create("new", dup),
            Err(StoreError::DuplicateFieldName { .. })
        ));
        assert!(!store.contains("new"));
    }

    #[test]
    fn test_rename_through_password_across_saves() {
        let mut store = RecordStore::new();
        store
            .create(
                "r",
                vec![
                    FieldEntry::inferred("url", "https://example.org"),
                    FieldEntry::new("memo", "one line", FieldKind::Notes),
                ],
            )
            .unwrap();

        store.rename_field("r", 0, "url", "password").unwrap();
        let record = store.rename_field("r", 1, "password", "url").unwrap();
        assert_eq!(record.field("url").unwrap().kind, FieldKind::Url);
        assert_eq!(record.field("url").unwrap().prior_kind, None);

        store.rename_field("r", 2, "memo", "password").unwrap();
        let record = store.rename_field("r", 3, "password", "memo").unwrap();
        assert_eq!(record.field("memo").unwrap().kind, FieldKind::Notes);
        assert_eq!(record.version(), 4);
    }

    #[test]
    fn test_fetch_missing() {
        assert_eq!(
            store().fetch("nope").unwrap_err(),
            StoreError::NotFound("nope".to_string())
        );
    }

    #[test]
    fn test_list_filter() {
        let store = store();
        assert_eq!(store.list(None).len(), 2);
        assert_eq!(store.list(Some("  ")).len(), 2);
        let hits: Vec<&str> = store
            .list(Some("MONDAY"))
            .into_iter()
            .map(Record::id)
            .collect();
        assert_eq!(hits, vec!["Bank"]);
        let hits: Vec<&str> = store
            .list(Some("user"))
            .into_iter()
            .map(Record::id)
            .collect();
        assert_eq!(hits, vec!["github"]);
        assert!(store.list(Some("zzz")).is_empty());
    }

    #[test]
    fn test_update_bumps_version_and_rejects_stale() {
        let mut store = store();
        let fields = vec![FieldEntry::inferred("username", "octocat")];
        let updated = store.update("github", 0, fields.clone()).unwrap();
        assert_eq!(updated.version(), 1);

        let err = store.update("github", 0, fields).unwrap_err();
        assert_eq!(
            err,
            StoreError::VersionConflict {
                id: "github".to_string(),
                expected: 0,
                actual: 1
            }
        );
        assert_eq!(store.get("github").unwrap().version(), 1);
    }

    #[test]
    fn test_single_field_operations_are_one_save_each() {
        let mut store = store();
        store
            .add_field("github", 0, "url", "https://github.com", None)
            .unwrap();
        store
            .rename_field("github", 1, "username", "login")
            .unwrap();
        store
            .set_field_value("github", 2, "login", "octocat")
            .unwrap();
        store.move_field_down("github", 3, "login").unwrap();
        store.move_field("github", 4, 2, 0).unwrap();
        let record = store.remove_field("github", 5, "password").unwrap();

        assert_eq!(record.version(), 6);
        let names: Vec<&str> = record.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["url", "login"]);
        assert_eq!(record.field("url").unwrap().kind, FieldKind::Url);
        assert_eq!(record.field("login").unwrap().value, "octocat");
    }

    #[test]
    fn test_failed_field_operation_does_not_save() {
        let mut store = store();
        let err = store
            .rename_field("github", 0, "username", "password")
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateFieldName { .. }));
        assert_eq!(store.get("github").unwrap().version(), 0);
    }

    #[test]
    fn test_commit_stale_draft() {
        let mut store = store();
        let mut first = store.edit("github").unwrap();
        let mut second = store.edit("github").unwrap();
        first.set_value("username", "one").unwrap();
        second.set_value("username", "two").unwrap();

        assert_eq!(store.commit(first).unwrap().version(), 1);
        assert!(matches!(
            store.commit(second),
            Err(StoreError::VersionConflict { .. })
        ));
        let github = store.get("github").unwrap();
        assert_eq!(github.field("username").unwrap().value, "one");
    }

    #[test]
    fn test_delete() {
        let mut store = store();
        let removed = store.delete("Bank").unwrap();
        assert_eq!(removed.id(), "Bank");
        assert!(store.get("Bank").is_none());
        assert!(store.delete("Bank").is_err());
    }

    #[test]
    fn test_move_and_sort_records() {
        let mut store = store();
        store.create("aardvark", vec![]).unwrap();
        store.move_record("aardvark", 1).unwrap();
        assert_eq!(store.ids(), vec!["github", "aardvark", "Bank"]);
        assert!(matches!(
            store.move_record("github", 3),
            Err(StoreError::PositionOutOfRange { index: 3, len: 3 })
        ));
        store.sort_by_id();
        assert_eq!(store.ids(), vec!["aardvark", "Bank", "github"]);
    }
}
