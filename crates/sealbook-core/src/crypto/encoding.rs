//! Serde helpers for binary fields stored as base64 text.

pub mod b64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD
            .decode(text.as_bytes())
            .map_err(serde::de::Error::custom)
    }

    /// Fixed 32-byte arrays (verifiers).
    pub mod array32 {
        use serde::{Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            bytes: &[u8; 32],
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            super::serialize(bytes, serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<[u8; 32], D::Error> {
            let bytes = super::deserialize(deserializer)?;
            let len = bytes.len();
            bytes.try_into().map_err(|_| {
                serde::de::Error::custom(format!("expected 32 bytes, found {}", len))
            })
        }
    }
}
