//! The decrypted vault document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::CipherAlgorithm;
use crate::store::RecordStore;

/// Document-level metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Metadata {
    /// Metadata stamped now. A blank title is stored as no title.
    pub fn new(title: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            title: normalize_title(title),
            created_at: now,
            modified_at: now,
        }
    }
}

pub(crate) fn normalize_title(title: Option<String>) -> Option<String> {
    title.filter(|title| !title.trim().is_empty())
}

/// Records plus the metadata and algorithm choice saved with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    pub meta: Metadata,
    pub algorithm: CipherAlgorithm,
    pub records: RecordStore,
}

impl Database {
    pub fn new(title: Option<String>, algorithm: CipherAlgorithm) -> Self {
        Self {
            meta: Metadata::new(title),
            algorithm,
            records: RecordStore::new(),
        }
    }

    /// Stamp the modification time.
    pub fn touch(&mut self) {
        self.meta.modified_at = Utc::now();
    }
}
