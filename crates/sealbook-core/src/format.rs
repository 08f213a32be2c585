//! Canonical plaintext document format.
//!
//! ```json
//! {
//!   "format": "sealbook/1",
//!   "meta": { "title": "...", "created_at": "...", "modified_at": "..." },
//!   "algorithm": "crypt-aes-256-gcm",
//!   "records": [
//!     { "id": "github", "version": 3,
//!       "fields": [ { "name": "password", "value": "...", "kind": "password" } ] }
//!   ]
//! }
//! ```
//!
//! A password field may also carry `prior_kind`, the kind it had before it
//! became a password field.
//!
//! Import parses into staging structs and validates everything before a
//! [`Database`] is built, so a bad document never yields a partial result.
//! Older flat documents (records keyed by `__id__`, algorithm under
//! `crypt.algorithm`, timestamps in `meta.ctime`/`meta.mtime`) are accepted
//! too; their field kinds are inferred and versions start at 0.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::crypto::CipherAlgorithm;
use crate::database::{Database, Metadata};
use crate::error::{ImportError, Result};
use crate::store::{FieldEntry, FieldKind, Record, RecordStore};

/// Format tag written into every exported document.
pub const FORMAT_TAG: &str = "sealbook/1";

/// Record key holding the id in flat legacy records.
pub const LEGACY_ID_KEY: &str = "__id__";

type ImportResult<T> = std::result::Result<T, ImportError>;

#[derive(Serialize)]
struct DocumentOut<'a> {
    format: &'static str,
    meta: &'a Metadata,
    algorithm: CipherAlgorithm,
    records: Vec<RecordOut<'a>>,
}

#[derive(Serialize)]
struct RecordOut<'a> {
    id: &'a str,
    version: u64,
    fields: &'a [FieldEntry],
}

/// Render a database as pretty-printed canonical JSON.
pub fn export(db: &Database) -> Result<String> {
    let document = DocumentOut {
        format: FORMAT_TAG,
        meta: &db.meta,
        algorithm: db.algorithm,
        records: db
            .records
            .iter()
            .map(|record| RecordOut {
                id: record.id(),
                version: record.version(),
                fields: record.fields(),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

#[derive(Deserialize)]
struct DocumentIn {
    format: Option<String>,
    #[serde(default)]
    meta: Option<Map<String, Value>>,
    algorithm: Option<String>,
    #[serde(default)]
    crypt: Option<LegacyCrypt>,
    #[serde(default)]
    records: Vec<Value>,
}

#[derive(Deserialize)]
struct LegacyCrypt {
    algorithm: Option<String>,
}

#[derive(Deserialize)]
struct RecordIn {
    id: String,
    #[serde(default)]
    version: u64,
    #[serde(default)]
    fields: Vec<FieldIn>,
}

#[derive(Deserialize)]
struct FieldIn {
    name: String,
    #[serde(default)]
    value: String,
    kind: Option<String>,
    prior_kind: Option<String>,
}

/// A record that passed shape checks but not yet the id/name invariants.
struct StagedRecord {
    id: String,
    version: u64,
    fields: Vec<FieldEntry>,
}

/// Parse and validate a canonical (or legacy) document.
///
/// # Errors
///
/// See [`ImportError`]; errors name the offending record by index or id.
pub fn import(text: &str) -> ImportResult<Database> {
    let document: DocumentIn = serde_json::from_str(text.trim())
        .map_err(|e| ImportError::Malformed(e.to_string()))?;

    if let Some(format) = &document.format {
        if format != FORMAT_TAG {
            return Err(ImportError::UnsupportedFormat(format.clone()));
        }
    }

    let algorithm = match document
        .algorithm
        .or_else(|| document.crypt.and_then(|crypt| crypt.algorithm))
        .filter(|id| !id.trim().is_empty())
    {
        Some(id) => id
            .parse::<CipherAlgorithm>()
            .map_err(|_| ImportError::UnknownAlgorithm(id))?,
        None => CipherAlgorithm::default(),
    };

    let meta = stage_meta(document.meta.unwrap_or_default());

    let mut staged = Vec::with_capacity(document.records.len());
    for (index, value) in document.records.into_iter().enumerate() {
        staged.push(stage_record(index, value)?);
    }
    let store = validate(staged)?;

    tracing::debug!(records = store.len(), %algorithm, "imported document");
    Ok(Database {
        meta,
        algorithm,
        records: store,
    })
}

fn timestamp(meta: &Map<String, Value>, keys: &[&str]) -> Option<DateTime<Utc>> {
    keys.iter()
        .filter_map(|key| meta.get(*key).and_then(Value::as_str))
        .find_map(|text| DateTime::parse_from_rfc3339(text).ok())
        .map(|parsed| parsed.with_timezone(&Utc))
}

fn stage_meta(meta: Map<String, Value>) -> Metadata {
    let title = meta
        .get("title")
        .and_then(Value::as_str)
        .map(str::to_string);
    let created_at = timestamp(&meta, &["created_at", "ctime"]);
    let modified_at = timestamp(&meta, &["modified_at", "mtime"]);

    let now = Utc::now();
    let created_at = created_at.or(modified_at).unwrap_or(now);
    Metadata {
        title,
        created_at,
        modified_at: modified_at.unwrap_or(created_at),
    }
}

fn stage_record(index: usize, value: Value) -> ImportResult<StagedRecord> {
    match value {
        Value::Object(object) if object.contains_key(LEGACY_ID_KEY) => {
            stage_legacy_record(index, object)
        }
        value => {
            let record: RecordIn = serde_json::from_value(value)
                .map_err(|e| ImportError::Malformed(format!("record #{}: {}", index, e)))?;
            let mut fields = Vec::with_capacity(record.fields.len());
            for field in record.fields {
                let kind = match &field.kind {
                    Some(kind) => parse_kind(&record.id, &field.name, kind)?,
                    None => FieldKind::infer(&field.name, &field.value),
                };
                let prior_kind = match &field.prior_kind {
                    Some(prior) if kind == FieldKind::Password => {
                        Some(parse_kind(&record.id, &field.name, prior)?)
                    }
                    _ => None,
                };
                let mut entry = FieldEntry::new(field.name, field.value, kind);
                entry.prior_kind = prior_kind.filter(|prior| *prior != FieldKind::Password);
                fields.push(entry);
            }
            Ok(StagedRecord {
                id: record.id,
                version: record.version,
                fields,
            })
        }
    }
}

fn parse_kind(record: &str, field: &str, kind: &str) -> ImportResult<FieldKind> {
    kind.parse::<FieldKind>().map_err(|kind| ImportError::UnknownFieldKind {
        record: record.to_string(),
        field: field.to_string(),
        kind,
    })
}

fn stage_legacy_record(index: usize, object: Map<String, Value>) -> ImportResult<StagedRecord> {
    let mut id = None;
    let mut fields = Vec::with_capacity(object.len().saturating_sub(1));
    for (key, value) in object {
        let Value::String(value) = value else {
            return Err(ImportError::Malformed(format!(
                "record #{}: field {} is not a string",
                index, key
            )));
        };
        if key == LEGACY_ID_KEY {
            id = Some(value);
        } else {
            fields.push(FieldEntry::inferred(key, value));
        }
    }
    Ok(StagedRecord {
        id: id.unwrap_or_default(),
        version: 0,
        fields,
    })
}

fn validate(staged: Vec<StagedRecord>) -> ImportResult<RecordStore> {
    let mut ids = HashSet::with_capacity(staged.len());
    let mut records = Vec::with_capacity(staged.len());
    for (index, record) in staged.into_iter().enumerate() {
        if record.id.trim().is_empty() {
            return Err(ImportError::EmptyId { index });
        }
        if !ids.insert(record.id.clone()) {
            return Err(ImportError::DuplicateId(record.id));
        }
        let mut names = HashSet::with_capacity(record.fields.len());
        for (field_index, field) in record.fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(ImportError::EmptyFieldName {
                    record: record.id.clone(),
                    index: field_index,
                });
            }
            if !names.insert(field.name.as_str()) {
                return Err(ImportError::DuplicateFieldName {
                    record: record.id.clone(),
                    name: field.name.clone(),
                });
            }
        }
        records.push(Record::from_parts(record.id, record.version, record.fields));
    }
    Ok(RecordStore::from_records(records))
}
