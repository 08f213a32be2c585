//! An unlocked vault.
//!
//! A [`Session`] is the only way to reach a [`Database`]: it is obtained by
//! creating a new vault or by unlocking sealed text with the master
//! password. It owns the master key for as long as it lives; dropping it (or
//! calling [`Session::lock`]) zeroizes the key.
//!
//! Every state change that can fail builds the new state on the side first
//! and swaps it in last, so an error or a cancellation leaves the session as
//! it was.

use crate::crypto::{
    armor, dearmor, decrypt, derive, encrypt, reencrypt, validate_master_password,
    CipherAlgorithm, Envelope, KdfParams, KdfStrength, KeyCheck, MasterKey,
};
use crate::database::{normalize_title, Database};
use crate::error::{AuthError, CryptoError, ImportError, Result};
use crate::format;
use crate::store::RecordStore;
use crate::task::CancelToken;

/// Outcome of [`Session::merge_from_text`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Ids that were added.
    pub added: Vec<String>,
    /// Ids that already existed and were left alone.
    pub skipped: Vec<String>,
}

#[derive(Debug)]
pub struct Session {
    db: Database,
    key: MasterKey,
    key_check: KeyCheck,
}

impl Session {
    /// Create an empty vault protected by `password`.
    ///
    /// # Errors
    ///
    /// `AuthError::WeakPassword` when the password fails the minimum rules.
    pub fn create(
        password: &str,
        strength: KdfStrength,
        algorithm: CipherAlgorithm,
        title: Option<String>,
    ) -> Result<Session> {
        Self::create_with_params(password, KdfParams::generate(strength), algorithm, title)
    }

    /// [`Session::create`] with explicit KDF parameters.
    pub fn create_with_params(
        password: &str,
        params: KdfParams,
        algorithm: CipherAlgorithm,
        title: Option<String>,
    ) -> Result<Session> {
        validate_master_password(password)?;
        let derived = derive(password, &params)?;
        let key_check = derived.key_check(&params);
        tracing::info!(%algorithm, "created vault");
        Ok(Session {
            db: Database::new(title, algorithm),
            key: derived.key,
            key_check,
        })
    }

    /// Unlock sealed text.
    ///
    /// # Errors
    ///
    /// `AuthError::WrongPassword` when the password does not open the vault,
    /// whether the key check or the decryption rejected it. Structural
    /// problems with the sealed text are reported as `CryptoError`.
    pub fn unlock(sealed: &str, password: &str) -> Result<Session> {
        Self::unlock_with(sealed, password, &CancelToken::new())
    }

    /// [`Session::unlock`], abandoned if `cancel` fires before it finishes.
    pub fn unlock_with(sealed: &str, password: &str, cancel: &CancelToken) -> Result<Session> {
        let envelope = dearmor(sealed)?;
        cancel.check()?;
        let derived = derive(password, &envelope.key_check.kdf)?;

        // Both checks always run.
        let verified = derived.verifier.ct_matches(&envelope.key_check.verifier);
        let opened = decrypt(&envelope.blob, &derived.key);
        cancel.check()?;
        let plaintext = match (verified, opened) {
            (true, Ok(plaintext)) => plaintext,
            _ => {
                tracing::warn!("unlock rejected");
                return Err(AuthError::WrongPassword.into());
            }
        };

        let text = String::from_utf8(plaintext)
            .map_err(|_| ImportError::Malformed("Vault plaintext is not UTF-8".to_string()))?;
        let mut db = format::import(&text)?;
        db.algorithm = envelope.blob.algorithm;

        tracing::info!(records = db.records.len(), algorithm = %db.algorithm, "vault unlocked");
        Ok(Session {
            db,
            key: derived.key,
            key_check: envelope.key_check,
        })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn records(&self) -> &RecordStore {
        &self.db.records
    }

    /// Mutable access to the records. Stamps the modification time.
    pub fn records_mut(&mut self) -> &mut RecordStore {
        self.db.touch();
        &mut self.db.records
    }

    pub fn algorithm(&self) -> CipherAlgorithm {
        self.db.algorithm
    }

    pub fn key_check(&self) -> &KeyCheck {
        &self.key_check
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.db.meta.title = normalize_title(title);
        self.db.touch();
    }

    /// Encrypt the current state with the current algorithm and armor it.
    pub fn seal(&self) -> Result<String> {
        let plaintext = format::export(&self.db)?;
        let blob = encrypt(plaintext.as_bytes(), &self.key, self.db.algorithm)?;
        armor(&Envelope {
            key_check: self.key_check.clone(),
            blob,
        })
    }

    /// Canonical plaintext of the current state.
    pub fn export_plain(&self) -> Result<String> {
        format::export(&self.db)
    }

    /// Re-encrypt the vault under `target`.
    ///
    /// The current state is sealed under the old algorithm, re-encrypted, and
    /// the new ciphertext is decrypted once more and compared before the
    /// switch is committed.
    ///
    /// # Errors
    ///
    /// Any crypto error, `CryptoError::Decryption` if the check round fails,
    /// or `Cancelled`. In every case the algorithm is unchanged.
    pub fn switch_algorithm(
        &mut self,
        target: CipherAlgorithm,
        cancel: &CancelToken,
    ) -> Result<()> {
        let from = self.db.algorithm;
        if from == target {
            return Ok(());
        }

        let plaintext = format::export(&self.db)?;
        let current = encrypt(plaintext.as_bytes(), &self.key, from)?;
        let moved = reencrypt(&current, &self.key, target, cancel)?;
        let check = decrypt(&moved, &self.key)?;
        if check != plaintext.as_bytes() {
            return Err(CryptoError::Decryption.into());
        }
        cancel.check()?;

        self.db.algorithm = target;
        tracing::info!(%from, to = %target, "switched algorithm");
        Ok(())
    }

    /// Replace the whole database with a canonical document (raw edit).
    ///
    /// The document's `algorithm` becomes the session's algorithm.
    pub fn replace_from_text(&mut self, text: &str) -> Result<()> {
        let staged = format::import(text)?;
        tracing::info!(records = staged.records.len(), "replaced vault contents");
        self.db = staged;
        Ok(())
    }

    /// Add the records of a canonical document whose ids are not taken yet.
    pub fn merge_from_text(&mut self, text: &str) -> Result<MergeReport> {
        let staged = format::import(text)?;
        let mut report = MergeReport::default();
        let mut merged = self.db.records.clone();
        for record in staged.records.iter() {
            if merged.contains(record.id()) {
                report.skipped.push(record.id().to_string());
            } else {
                merged.insert(record.clone())?;
                report.added.push(record.id().to_string());
            }
        }
        if !report.added.is_empty() {
            self.db.records = merged;
            self.db.touch();
        }
        tracing::info!(
            added = report.added.len(),
            skipped = report.skipped.len(),
            "merged document"
        );
        Ok(report)
    }

    /// Re-key the vault with a new password and a fresh salt.
    pub fn change_password(&mut self, new_password: &str, strength: KdfStrength) -> Result<()> {
        self.change_password_with_params(new_password, KdfParams::generate(strength))
    }

    /// [`Session::change_password`] with explicit KDF parameters.
    pub fn change_password_with_params(
        &mut self,
        new_password: &str,
        params: KdfParams,
    ) -> Result<()> {
        validate_master_password(new_password)?;
        let derived = derive(new_password, &params)?;
        self.key_check = derived.key_check(&params);
        self.key = derived.key;
        self.db.touch();
        tracing::info!("master password changed");
        Ok(())
    }

    /// Check `password` against the vault's key check.
    pub fn verify_password(&self, password: &str) -> Result<()> {
        crate::crypto::verify(password, &self.key_check).map(|_| ())
    }

    /// End the session. Key material is zeroized.
    pub fn lock(self) {
        tracing::info!("vault locked");
    }
}
