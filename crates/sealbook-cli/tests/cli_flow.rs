use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::{tempdir, TempDir};

use sealbook_core::crypto::looks_sealed;
use sealbook_core::{format, CipherAlgorithm, FieldKind, Session};

const PASSWORD: &str = "correct horse battery staple";

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sealbook"))
}

/// Isolated home for one test: config, data, and the vault file.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempdir().expect("tempdir should be available"),
        }
    }

    fn vault(&self) -> PathBuf {
        self.dir.path().join("vault.sealbook")
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config").join("config.toml")
    }

    fn command(&self, password: &str) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg-config"))
            .env("XDG_DATA_HOME", self.dir.path().join("xdg-data"))
            .env("SEALBOOK_CONFIG", self.config())
            .env("SEALBOOK_VAULT", self.vault())
            .env("SEALBOOK_PASSWORD", password)
            .env_remove("SEALBOOK_NEW_PASSWORD")
            .env_remove("SEALBOOK_LOG")
            .env("NO_COLOR", "1")
            .stdin(Stdio::null());
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.run_as(PASSWORD, args)
    }

    fn run_as(&self, password: &str, args: &[&str]) -> Output {
        self.command(password)
            .args(args)
            .output()
            .expect("binary should run")
    }

    fn init(&self) {
        let out = self.run(&["init", "--strength", "interactive", "--title", "Test vault"]);
        assert_success(&out);
    }

    fn unlock(&self, password: &str) -> Session {
        let sealed = std::fs::read_to_string(self.vault()).expect("vault should exist");
        Session::unlock(&sealed, password).expect("vault should unlock")
    }
}

fn assert_success(out: &Output) {
    assert!(
        out.status.success(),
        "command failed ({:?})\nstdout:\n{}\nstderr:\n{}",
        out.status.code(),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}

fn json(out: &Output) -> Value {
    serde_json::from_slice(&out.stdout).expect("stdout should be JSON")
}

#[test]
fn test_init_creates_sealed_vault_and_config() {
    let sandbox = Sandbox::new();
    sandbox.init();

    assert!(sandbox.vault().exists());
    assert!(sandbox.config().exists());
    let sealed = std::fs::read_to_string(sandbox.vault()).unwrap();
    assert!(looks_sealed(&sealed));

    let session = sandbox.unlock(PASSWORD);
    assert!(session.records().is_empty());
    assert_eq!(session.database().meta.title.as_deref(), Some("Test vault"));
    assert_eq!(session.algorithm(), CipherAlgorithm::Aes256Gcm);

    let again = sandbox.run(&["init", "--strength", "interactive"]);
    assert_eq!(again.status.code(), Some(4));
    assert!(stderr(&again).contains("--force"));
}

#[test]
fn test_add_list_show_edit_flow() {
    let sandbox = Sandbox::new();
    sandbox.init();

    let out = sandbox.run(&[
        "add",
        "aaa-test-record",
        "-f",
        "url=http://go-there.com",
        "-f",
        "username=mithrandir",
        "--generate",
        "cryptic",
    ]);
    assert_success(&out);

    let out = sandbox.run(&["list"]);
    assert_success(&out);
    assert!(stdout(&out).contains("aaa-test-record"));

    let out = sandbox.run(&["list", "mithrandir", "--json"]);
    assert_success(&out);
    let listed = json(&out);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(
        listed[0]["fields"],
        serde_json::json!(["url", "username", "password"])
    );

    let out = sandbox.run(&["show", "aaa-test-record", "--json"]);
    assert_success(&out);
    let shown = json(&out);
    let generated = sandbox
        .unlock(PASSWORD)
        .records()
        .get("aaa-test-record")
        .unwrap()
        .field("password")
        .unwrap()
        .value
        .clone();
    assert_ne!(
        shown["fields"][2]["value"],
        Value::String(generated.clone())
    );
    assert_eq!(shown["fields"][2]["kind"], "password");

    let out = sandbox.run(&["show", "aaa-test-record", "--json", "--reveal"]);
    assert_eq!(
        json(&out)["fields"][2]["value"],
        Value::String(generated.clone())
    );

    let out = sandbox.run(&[
        "edit",
        "aaa-test-record",
        "--set",
        "url=https://go-there.com",
        "--generate",
        "password",
        "--expected-version",
        "0",
    ]);
    assert_success(&out);

    let session = sandbox.unlock(PASSWORD);
    let record = session.records().get("aaa-test-record").unwrap();
    assert_eq!(record.version(), 1);
    assert_eq!(record.field("url").unwrap().value, "https://go-there.com");
    assert_eq!(record.field("url").unwrap().kind, FieldKind::Url);
    assert_ne!(record.field("password").unwrap().value, generated);

    let stale = sandbox.run(&[
        "edit",
        "aaa-test-record",
        "--set",
        "url=https://elsewhere.example",
        "--expected-version",
        "0",
    ]);
    assert_eq!(stale.status.code(), Some(7));
    assert!(stderr(&stale).contains("expected version 0, found 1"));
}

#[test]
fn test_export_import_and_algorithm_switch() {
    let sandbox = Sandbox::new();
    sandbox.init();
    assert_success(&sandbox.run(&["import", "--example"]));

    let out = sandbox.run(&["export", "--plain"]);
    assert_success(&out);
    let exported = format::import(&stdout(&out)).expect("export should parse");
    assert_eq!(exported.records.len(), 6);
    assert_eq!(&exported, sandbox.unlock(PASSWORD).database());

    let out = sandbox.run(&["export"]);
    assert_success(&out);
    assert!(looks_sealed(&stdout(&out)));

    let out = sandbox.run(&["algorithm", "crypt-chacha20-poly1305"]);
    assert_success(&out);
    let session = sandbox.unlock(PASSWORD);
    assert_eq!(session.algorithm(), CipherAlgorithm::ChaCha20Poly1305);
    assert_eq!(session.records(), &exported.records);

    let out = sandbox.run(&["algorithm"]);
    assert!(stdout(&out).contains("crypt-chacha20-poly1305"));

    let unknown = sandbox.run(&["algorithm", "crypt-rot13"]);
    assert_eq!(unknown.status.code(), Some(4));
}

#[test]
fn test_import_merge_from_file_keeps_existing() {
    let sandbox = Sandbox::new();
    sandbox.init();
    assert_success(&sandbox.run(&["add", "Mail", "-f", "username=mine"]));

    let document = sandbox.dir.path().join("import.json");
    std::fs::write(&document, sealbook_core::example::EXAMPLE_DOCUMENT).unwrap();
    let out = sandbox.run(&["import", "--merge", document.to_str().unwrap()]);
    assert_success(&out);
    assert!(stdout(&out).contains("Mail"));

    let session = sandbox.unlock(PASSWORD);
    assert_eq!(session.records().len(), 6);
    let mail = session.records().get("Mail").unwrap();
    assert_eq!(mail.field("username").unwrap().value, "mine");

    let broken = sandbox.dir.path().join("broken.json");
    std::fs::write(&broken, "{ not json").unwrap();
    let out = sandbox.run(&["import", broken.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(4));
    assert_eq!(sandbox.unlock(PASSWORD).records().len(), 6);
}

#[test]
fn test_wrong_password_exits_with_auth_code() {
    let sandbox = Sandbox::new();
    sandbox.init();

    let out = sandbox.run_as("not the password at all", &["list"]);
    assert_eq!(out.status.code(), Some(5));
    assert!(stderr(&out).contains("Wrong master password"));
}

#[test]
fn test_missing_vault_is_not_found() {
    let sandbox = Sandbox::new();
    let out = sandbox.run(&["list"]);
    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains("sealbook init"));
}

#[test]
fn test_rm_requires_confirmation_when_not_interactive() {
    let sandbox = Sandbox::new();
    sandbox.init();
    assert_success(&sandbox.run(&["add", "wifi", "-f", "password=second-breakfast"]));

    let refused = sandbox.run(&["rm", "wifi"]);
    assert_eq!(refused.status.code(), Some(4));
    assert!(sandbox.unlock(PASSWORD).records().contains("wifi"));

    assert_success(&sandbox.run(&["rm", "wifi", "--yes"]));
    assert!(!sandbox.unlock(PASSWORD).records().contains("wifi"));

    let missing = sandbox.run(&["rm", "wifi", "--yes"]);
    assert_eq!(missing.status.code(), Some(3));
}

#[test]
fn test_passwd_rekeys_vault() {
    let sandbox = Sandbox::new();
    sandbox.init();
    assert_success(&sandbox.run(&["add", "bank", "-f", "username=bilbo"]));

    let out = sandbox
        .command(PASSWORD)
        .env("SEALBOOK_NEW_PASSWORD", "a brand new passphrase")
        .args(["passwd", "--strength", "interactive"])
        .output()
        .unwrap();
    assert_success(&out);

    let sealed = std::fs::read_to_string(sandbox.vault()).unwrap();
    let err = Session::unlock(&sealed, PASSWORD).unwrap_err();
    assert!(err.is_wrong_password());
    let session = sandbox.unlock("a brand new passphrase");
    assert!(session.records().contains("bank"));
}

#[test]
fn test_generate_needs_no_vault() {
    let sandbox = Sandbox::new();
    let out = sandbox.run(&["generate", "--memorable", "--count", "3"]);
    assert_success(&out);
    let lines: Vec<String> = stdout(&out).lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 3);
    for line in lines {
        assert_eq!(line.matches('/').count(), 2);
        assert!(line.chars().count() > 10);
    }

    let out = sandbox.run(&["generate", "--min", "12", "--max", "12", "--json"]);
    assert_success(&out);
    let generated = json(&out);
    assert_eq!(generated[0]["chars"], 12);
}
