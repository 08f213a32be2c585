//! Built-in example vault, handy for trying the tool and for tests.

use crate::database::Database;
use crate::error::ImportError;
use crate::format;

/// Example document in the canonical format. Every secret in it is fake.
pub const EXAMPLE_DOCUMENT: &str = r#"{
  "format": "sealbook/1",
  "meta": {
    "title": "Example vault",
    "created_at": "2024-01-15T09:30:00Z",
    "modified_at": "2024-02-02T18:04:11Z"
  },
  "algorithm": "crypt-aes-256-gcm",
  "records": [
    {
      "id": "Bookshop",
      "version": 2,
      "fields": [
        { "name": "url", "value": "https://books.example.com", "kind": "url" },
        { "name": "username", "value": "reader@example.org", "kind": "text" },
        { "name": "password", "value": "tQ7-vLm2.xRe9kPa_Zw", "kind": "password" },
        { "name": "notes", "kind": "notes",
          "value": "Loyalty card on the fridge.\nRenews every March." }
      ]
    },
    {
      "id": "Cloud console",
      "version": 0,
      "fields": [
        { "name": "url", "value": "https://console.example.net", "kind": "url" },
        { "name": "username", "value": "ops-admin", "kind": "text" },
        { "name": "password", "value": "orbit/lantern/harvest", "kind": "password" },
        { "name": "account id", "value": "4471-2290-5518", "kind": "text" }
      ]
    },
    {
      "id": "Code hosting",
      "version": 5,
      "fields": [
        { "name": "url", "value": "https://git.example.dev", "kind": "url" },
        { "name": "username", "value": "hacker42", "kind": "text" },
        { "name": "password", "value": "Hn3!sPq8wYc.Uv0mJt", "kind": "password" },
        { "name": "recovery codes", "value": "a1b2-c3d4\ne5f6-g7h8\ni9j0-k1l2", "kind": "notes" }
      ]
    },
    {
      "id": "Home wifi",
      "version": 1,
      "fields": [
        { "name": "ssid", "value": "Burrow-5G", "kind": "text" },
        { "name": "password", "value": "meadow/kettle/pebble", "kind": "password" }
      ]
    },
    {
      "id": "Mail",
      "version": 3,
      "fields": [
        { "name": "url", "value": "https://mail.example.org", "kind": "url" },
        { "name": "url-admin", "value": "https://mail.example.org/admin", "kind": "url" },
        { "name": "username", "value": "reader@example.org", "kind": "text" },
        { "name": "password", "value": "G5_kd.Wn2rTq-8yLzAe", "kind": "password" }
      ]
    },
    {
      "id": "Safe deposit box",
      "version": 0,
      "fields": [
        { "name": "branch", "value": "Main Street", "kind": "text" },
        { "name": "pin", "value": "8817", "kind": "password" },
        { "name": "notes", "value": "Key is in the blue envelope.", "kind": "notes" }
      ]
    }
  ]
}"#;

/// Parse [`EXAMPLE_DOCUMENT`].
pub fn example_database() -> Result<Database, ImportError> {
    format::import(EXAMPLE_DOCUMENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FieldKind;

    #[test]
    fn test_example_parses() {
        let db = example_database().unwrap();
        assert_eq!(db.records.len(), 6);
        assert_eq!(db.meta.title.as_deref(), Some("Example vault"));
        let mail = db.records.get("Mail").unwrap();
        assert_eq!(mail.version(), 3);
        assert_eq!(mail.field("url-admin").unwrap().kind, FieldKind::Url);
    }

    #[test]
    fn test_example_survives_export() {
        let db = example_database().unwrap();
        assert_eq!(format::import(&format::export(&db).unwrap()).unwrap(), db);
    }
}
