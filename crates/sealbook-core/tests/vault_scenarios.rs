use rand::rngs::StdRng;
use rand::SeedableRng;

use sealbook_core::crypto::{derive, verify, KdfParams};
use sealbook_core::error::StoreError;
use sealbook_core::format::{export, import};
use sealbook_core::generator::{CrypticConfig, MemorableConfig};
use sealbook_core::{
    CancelToken, CipherAlgorithm, FieldEntry, FieldKind, Generator, PasswordStyle, SealbookError,
    Session,
};

const PASSWORD: &str = "mellon-speak-friend";

fn fast_params() -> KdfParams {
    KdfParams::new(8, 1, 1, b"integration-test-salt".to_vec())
}

fn session_with_records() -> Session {
    let mut session = Session::create_with_params(
        PASSWORD,
        fast_params(),
        CipherAlgorithm::Aes256Gcm,
        Some("Scenarios".to_string()),
    )
    .expect("create should succeed");
    let records = session.records_mut();
    records
        .create(
            "bank",
            vec![
                FieldEntry::inferred("username", "bilbo"),
                FieldEntry::inferred("password", "precious-ring"),
            ],
        )
        .expect("create should succeed");
    records
        .create("wifi", vec![FieldEntry::inferred("password", "second-breakfast")])
        .expect("create should succeed");
    session
}

fn create_test_record(session: &mut Session) {
    session
        .records_mut()
        .create(
            "aaa-test-record",
            vec![
                FieldEntry::inferred("url", "http://go-there.com"),
                FieldEntry::inferred("username", "mithrandir"),
                FieldEntry::new("password", "you-shall-not-pass", FieldKind::Password),
                FieldEntry::inferred("notes", "multi\nline\ntext"),
            ],
        )
        .expect("create should succeed");
}

#[test]
fn test_create_test_record_lists_fields_in_order() {
    let mut session = session_with_records();
    let before = session.records().ids().len();
    create_test_record(&mut session);

    let listed = session.records().list(None);
    assert_eq!(listed.len(), before + 1);
    let ids: Vec<&str> = listed.iter().map(|record| record.id()).collect();
    assert_eq!(ids.iter().filter(|id| **id == "aaa-test-record").count(), 1);

    let record = session
        .records()
        .fetch("aaa-test-record")
        .expect("fetch should succeed");
    let fields: Vec<(&str, &str, FieldKind)> = record
        .fields()
        .iter()
        .map(|field| (field.name.as_str(), field.value.as_str(), field.kind))
        .collect();
    assert_eq!(
        fields,
        vec![
            ("url", "http://go-there.com", FieldKind::Url),
            ("username", "mithrandir", FieldKind::Text),
            ("password", "you-shall-not-pass", FieldKind::Password),
            ("notes", "multi\nline\ntext", FieldKind::Notes),
        ]
    );
    assert_eq!(record.version(), 0);
}

#[test]
fn test_edit_url_and_regenerate_password() {
    let mut session = session_with_records();
    create_test_record(&mut session);
    let before = session
        .records()
        .fetch("aaa-test-record")
        .expect("fetch should succeed");

    let mut draft = session
        .records()
        .edit("aaa-test-record")
        .expect("edit should succeed");
    draft
        .set_value("url", "https://go-there.com")
        .expect("set should succeed");
    let mut rng = StdRng::seed_from_u64(2024);
    draft
        .regenerate("password", PasswordStyle::Cryptic, &Generator::default(), &mut rng)
        .expect("regenerate should succeed");
    session
        .records_mut()
        .commit(draft)
        .expect("commit should succeed");

    let after = session
        .records()
        .fetch("aaa-test-record")
        .expect("fetch should succeed");
    assert_eq!(after.field("url").unwrap().value, "https://go-there.com");
    assert_ne!(
        after.field("password").unwrap().value,
        before.field("password").unwrap().value
    );
    assert_eq!(after.version(), before.version() + 1);
}

#[test]
fn test_stale_update_fails_second_time() {
    let mut session = session_with_records();
    let version = session.records().fetch("bank").unwrap().version();
    let fields = vec![FieldEntry::inferred("username", "frodo")];

    session
        .records_mut()
        .update("bank", version, fields.clone())
        .expect("first update should succeed");
    let err = session
        .records_mut()
        .update("bank", version, fields)
        .expect_err("second update should conflict");
    assert!(matches!(err, StoreError::VersionConflict { .. }));
}

#[test]
fn test_rename_to_password_and_back() {
    let mut session = session_with_records();
    create_test_record(&mut session);
    let records = session.records_mut();

    records
        .remove_field("aaa-test-record", 0, "password")
        .expect("remove should succeed");
    let record = records
        .rename_field("aaa-test-record", 1, "notes", "Password")
        .expect("rename should succeed");
    assert_eq!(record.field("Password").unwrap().kind, FieldKind::Password);

    let record = records
        .rename_field("aaa-test-record", 2, "Password", "notes")
        .expect("rename should succeed");
    let notes = record.field("notes").unwrap();
    assert_eq!(notes.kind, FieldKind::Notes);
    assert_eq!(notes.value, "multi\nline\ntext");

    let record = records
        .rename_field("aaa-test-record", 3, "username", "password")
        .expect("rename should succeed");
    assert!(record.field("password").unwrap().is_password());
    let record = records
        .rename_field("aaa-test-record", 4, "password", "login")
        .expect("rename should succeed");
    let login = record.field("login").unwrap();
    assert_eq!(login.kind, FieldKind::Text);
    assert_eq!(login.value, "mithrandir");
}

#[test]
fn test_algorithm_switch_and_back_is_lossless() {
    let mut session = session_with_records();
    create_test_record(&mut session);
    let original = session.database().clone();
    let token = CancelToken::new();

    for algorithm in [CipherAlgorithm::Aes256GcmSiv, CipherAlgorithm::ChaCha20Poly1305] {
        session
            .switch_algorithm(algorithm, &token)
            .expect("switch should succeed");
        let sealed = session.seal().expect("seal should succeed");
        session = Session::unlock(&sealed, PASSWORD).expect("unlock should succeed");
        assert_eq!(session.algorithm(), algorithm);

        session
            .switch_algorithm(CipherAlgorithm::Aes256Gcm, &token)
            .expect("switch back should succeed");
        let sealed = session.seal().expect("seal should succeed");
        session = Session::unlock(&sealed, PASSWORD).expect("unlock should succeed");
        assert_eq!(session.database(), &original);
    }
}

#[test]
fn test_export_import_is_exact() {
    let mut session = session_with_records();
    create_test_record(&mut session);
    session
        .records_mut()
        .move_record("aaa-test-record", 0)
        .expect("move should succeed");
    let db = session.database();
    let text = export(db).expect("export should succeed");
    assert_eq!(&import(&text).expect("import should succeed"), db);
}

#[test]
fn test_verify_accepts_only_the_right_password() {
    let params = fast_params();
    for password in ["mellon-speak-friend", "ünïcødé pässwörd", "x"] {
        let check = derive(password, &params)
            .expect("derive should succeed")
            .key_check(&params);
        assert!(verify(password, &check).is_ok());
        let err = verify("something else", &check).expect_err("verify should fail");
        assert!(err.is_wrong_password());
    }
}

#[test]
fn test_generators_meet_minimum_shape() {
    let mut rng = StdRng::seed_from_u64(77);
    for _ in 0..500 {
        let cryptic =
            sealbook_core::generator::generate_cryptic(&mut rng, &CrypticConfig::default())
                .expect("cryptic should succeed");
        assert!(cryptic.password.chars().count() > 10);

        let memorable =
            sealbook_core::generator::generate_memorable(&mut rng, &MemorableConfig::default())
                .expect("memorable should succeed");
        assert_eq!(memorable.password.matches('/').count(), 2);
        assert!(memorable.password.chars().count() > 10);
    }
}

#[test]
fn test_unlock_wrong_password_is_uniform() {
    let sealed = session_with_records().seal().expect("seal should succeed");
    let err = Session::unlock(&sealed, "not-mellon").expect_err("unlock should fail");
    assert!(matches!(
        err,
        SealbookError::Auth(sealbook_core::error::AuthError::WrongPassword)
    ));
}
