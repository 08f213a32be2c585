//! ASCII-armored sealed vault text.
//!
//! ```text
//! ---------------- sealbook crypt-aes-256-gcm prefix ----------------
//! eyJmb3JtYXQiOiJzZWFsYm9vay1zZWFsZWQvMSIsImFsZ29yaXRobSI6ImNyeXB0LWFl
//! ...
//! ---------------- sealbook crypt-aes-256-gcm suffix ----------------
//! ```
//!
//! Banner lines are exactly [`LINE_WIDTH`] characters. The body is base64
//! wrapped at the same width and decodes to a JSON [`Envelope`] carrying the
//! key check, the nonce, and the ciphertext.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::cipher::{CipherAlgorithm, SealedBlob};
use super::encoding::b64;
use super::kdf::KeyCheck;
use crate::error::{CryptoError, Result};

/// Width of every armored line.
pub const LINE_WIDTH: usize = 72;

/// Format tag of the envelope JSON.
pub const ENVELOPE_FORMAT: &str = "sealbook-sealed/1";

const BANNER_TAG: &str = "sealbook";

/// Decoded sealed vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub key_check: KeyCheck,
    pub blob: SealedBlob,
}

#[derive(Serialize, Deserialize)]
struct WireEnvelope {
    format: String,
    algorithm: String,
    key_check: KeyCheck,
    #[serde(with = "b64")]
    nonce: Vec<u8>,
    #[serde(with = "b64")]
    ciphertext: Vec<u8>,
}

/// Banner line for `algorithm`, `kind` being `prefix` or `suffix`.
pub fn banner(algorithm: CipherAlgorithm, kind: &str) -> String {
    let title = format!("{} {} {}", BANNER_TAG, algorithm.id(), kind);
    let inner = title.len() + 2;
    let right = LINE_WIDTH.saturating_sub(inner) / 2;
    let left = LINE_WIDTH.saturating_sub(inner + right);
    format!("{} {} {}", "-".repeat(left), title, "-".repeat(right))
}

/// True when `text` looks like armored output rather than plaintext JSON.
pub fn looks_sealed(text: &str) -> bool {
    text.trim_start().starts_with('-')
}

/// Render an envelope as armored text (trailing newline included).
pub fn armor(envelope: &Envelope) -> Result<String> {
    let wire = WireEnvelope {
        format: ENVELOPE_FORMAT.to_string(),
        algorithm: envelope.blob.algorithm.id().to_string(),
        key_check: envelope.key_check.clone(),
        nonce: envelope.blob.nonce.clone(),
        ciphertext: envelope.blob.ciphertext.clone(),
    };
    let json = serde_json::to_vec(&wire)
        .map_err(|e| CryptoError::Encryption(format!("Envelope encoding failed: {}", e)))?;
    let body = STANDARD.encode(json);

    let algorithm = envelope.blob.algorithm;
    let mut out = String::with_capacity(body.len() + body.len() / LINE_WIDTH + 3 * LINE_WIDTH);
    out.push_str(&banner(algorithm, "prefix"));
    out.push('\n');
    // base64 output is ASCII, so byte chunks are char boundaries.
    for chunk in body.as_bytes().chunks(LINE_WIDTH) {
        out.push_str(std::str::from_utf8(chunk).unwrap_or_default());
        out.push('\n');
    }
    out.push_str(&banner(algorithm, "suffix"));
    out.push('\n');
    Ok(out)
}

fn banner_algorithm(line: &str, kind: &str) -> Result<CipherAlgorithm> {
    let words: Vec<&str> = line
        .trim_matches(|c: char| c == '-' || c.is_whitespace())
        .split_whitespace()
        .collect();
    match words.as_slice() {
        [tag, algorithm, found] if *tag == BANNER_TAG && *found == kind => {
            Ok(algorithm.parse::<CipherAlgorithm>()?)
        }
        _ => Err(CryptoError::Malformed(format!("Missing {} banner", kind)).into()),
    }
}

/// Parse armored text back into an envelope.
///
/// # Errors
///
/// `UnsupportedAlgorithm` for an unknown algorithm id; `Malformed` for
/// missing banners, bad base64, a bad envelope, or banner/body disagreement.
pub fn dearmor(text: &str) -> Result<Envelope> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() < 3 {
        return Err(CryptoError::Malformed("Sealed text is truncated".to_string()).into());
    }

    let prefix = banner_algorithm(lines[0], "prefix")?;
    let suffix = banner_algorithm(lines[lines.len() - 1], "suffix")?;
    if prefix != suffix {
        return Err(CryptoError::Malformed("Prefix and suffix disagree".to_string()).into());
    }

    let body: String = lines[1..lines.len() - 1].concat();
    let json = STANDARD
        .decode(body.as_bytes())
        .map_err(|e| CryptoError::Malformed(format!("Invalid base64 body: {}", e)))?;
    let wire: WireEnvelope = serde_json::from_slice(&json)
        .map_err(|e| CryptoError::Malformed(format!("Invalid envelope: {}", e)))?;

    if wire.format != ENVELOPE_FORMAT {
        return Err(
            CryptoError::Malformed(format!("Unknown envelope format: {}", wire.format)).into(),
        );
    }
    let algorithm = wire.algorithm.parse::<CipherAlgorithm>()?;
    if algorithm != prefix {
        return Err(
            CryptoError::Malformed("Banner and envelope algorithms disagree".to_string()).into(),
        );
    }

    Ok(Envelope {
        key_check: wire.key_check,
        blob: SealedBlob {
            algorithm,
            nonce: wire.nonce,
            ciphertext: wire.ciphertext,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::cipher::encrypt;
    use crate::crypto::kdf::{derive, test_params};
    use crate::error::SealbookError;

    fn sample(algorithm: CipherAlgorithm) -> Envelope {
        let params = test_params();
        let derived = derive("armor-test-pw", &params).unwrap();
        Envelope {
            key_check: derived.key_check(&params),
            blob: encrypt(b"{\"records\":[]}", &derived.key, algorithm).unwrap(),
        }
    }

    #[test]
    fn test_banner_is_line_width() {
        for algorithm in CipherAlgorithm::ALL {
            for kind in ["prefix", "suffix"] {
                let line = banner(algorithm, kind);
                assert_eq!(line.len(), LINE_WIDTH, "{}", line);
                assert!(line.contains(algorithm.id()));
            }
        }
    }

    #[test]
    fn test_armor_round_trip() {
        for algorithm in CipherAlgorithm::ALL {
            let envelope = sample(algorithm);
            let text = armor(&envelope).unwrap();
            assert!(looks_sealed(&text));
            assert!(text.lines().all(|line| line.len() <= LINE_WIDTH));
            assert_eq!(dearmor(&text).unwrap(), envelope);
        }
    }

    #[test]
    fn test_dearmor_tolerates_surrounding_whitespace() {
        let envelope = sample(CipherAlgorithm::Aes256Gcm);
        let text = format!("\n\n  {}  \n", armor(&envelope).unwrap());
        assert_eq!(dearmor(&text).unwrap(), envelope);
    }

    #[test]
    fn test_plain_json_is_not_sealed() {
        assert!(!looks_sealed("  {\"records\": []}"));
    }

    #[test]
    fn test_unknown_banner_algorithm() {
        let text = armor(&sample(CipherAlgorithm::Aes256Gcm))
            .unwrap()
            .replace("crypt-aes-256-gcm", "crypt-des");
        let err = dearmor(&text).unwrap_err();
        assert!(matches!(
            err,
            SealbookError::Crypto(CryptoError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_mismatched_banner_rejected() {
        let text = armor(&sample(CipherAlgorithm::Aes256Gcm)).unwrap();
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        lines[0] = banner(CipherAlgorithm::ChaCha20Poly1305, "prefix");
        let last = lines.len() - 1;
        lines[last] = banner(CipherAlgorithm::ChaCha20Poly1305, "suffix");
        let err = dearmor(&lines.join("\n")).unwrap_err();
        assert!(matches!(err, SealbookError::Crypto(CryptoError::Malformed(_))));
    }

    #[test]
    fn test_truncated_text_rejected() {
        let text = banner(CipherAlgorithm::Aes256Gcm, "prefix");
        assert!(dearmor(&text).is_err());
    }
}
