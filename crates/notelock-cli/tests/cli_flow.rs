use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use rusqlite::Connection;
use tempfile::TempDir;

const PASSWORD: &str = "correct horse battery staple";
const MARKER: &str = "PLAINTEXT_MARKER_42";

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_notelock"))
}

/// Isolated config/data homes plus a store path inside them.
struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("c")).expect("create config dir");
        std::fs::create_dir_all(dir.path().join("d")).expect("create data dir");
        Self { dir }
    }

    fn config_home(&self) -> PathBuf {
        self.dir.path().join("c")
    }

    fn data_home(&self) -> PathBuf {
        self.dir.path().join("d")
    }

    fn store(&self) -> PathBuf {
        self.dir.path().join("notes.db")
    }

    fn command(&self, password: Option<&str>) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("XDG_CONFIG_HOME", self.config_home())
            .env("XDG_DATA_HOME", self.data_home())
            .env("NO_COLOR", "1")
            .env_remove("NOTELOCK_CONFIG")
            .env_remove("NOTELOCK_LOG")
            .env_remove("NOTELOCK_STORE")
            .env_remove("NOTELOCK_PASSWORD")
            .stdin(Stdio::null());
        if let Some(password) = password {
            cmd.env("NOTELOCK_PASSWORD", password);
        }
        cmd
    }

    /// Run against the explicit store path.
    fn run(&self, password: Option<&str>, args: &[&str]) -> Output {
        let store = self.store();
        let mut cmd = self.command(password);
        cmd.arg("--store").arg(&store).args(args);
        cmd.output().expect("run notelock")
    }

    fn init(&self) {
        let store = self.store();
        let output = self
            .command(None)
            .arg("init")
            .arg(&store)
            .output()
            .expect("run init");
        assert_success(&output);
    }

    fn new_note(&self, title: &str, body: &str) -> String {
        let output = self.run(None, &["-q", "new", title, "--body", body]);
        assert_success(&output);
        stdout(&output).trim().to_string()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed: status={:?}\nstdout={}\nstderr={}",
        output.status.code(),
        stdout(output),
        stderr(output)
    );
}

fn stored_row(path: &Path, id: &str) -> (String, bool, Option<String>) {
    let conn = Connection::open(path).expect("open sqlite");
    conn.query_row(
        "SELECT content, is_password_protected, password_hash FROM notes WHERE id = ?1",
        [id],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )
    .expect("note row")
}

#[test]
fn test_init_writes_config_used_by_later_commands() {
    let env = Env::new();
    env.init();

    let config_path = env.config_home().join("notelock").join("config.toml");
    let config = std::fs::read_to_string(&config_path).expect("config written");
    assert!(config.contains("[store]"));
    assert!(env.store().exists());

    // No --store: the path comes from the config file.
    let output = env
        .command(None)
        .args(["-q", "new", "From config", "--body", "hello"])
        .output()
        .expect("run new");
    assert_success(&output);

    let output = env
        .command(None)
        .args(["list", "--json"])
        .output()
        .expect("run list");
    assert_success(&output);
    assert!(stdout(&output).contains("From config"));
}

#[test]
fn test_init_refuses_existing_store() {
    let env = Env::new();
    env.init();
    let output = env
        .command(None)
        .arg("init")
        .arg(env.store())
        .output()
        .expect("run init");
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_init_keeps_existing_config_with_warning() {
    let env = Env::new();
    env.init();
    let config_path = env.config_home().join("notelock").join("config.toml");
    let before = std::fs::read_to_string(&config_path).expect("config written");

    let second = env.dir.path().join("second.db");
    let output = env
        .command(None)
        .arg("init")
        .arg(&second)
        .output()
        .expect("run init");
    assert_success(&output);
    assert!(second.exists());
    assert!(stderr(&output).contains("[WARN] Config already exists"));
    assert_eq!(
        std::fs::read_to_string(&config_path).expect("config kept"),
        before
    );
}

#[test]
fn test_missing_store_reports_not_found() {
    let env = Env::new();
    let output = env.run(None, &["list"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("notelock init"));
}

#[test]
fn test_protect_stores_only_ciphertext() {
    let env = Env::new();
    env.init();
    let id = env.new_note("Diary", &format!("dear diary {}", MARKER));

    let output = env.run(Some(PASSWORD), &["protect", &id]);
    assert_success(&output);

    let (content, protected, hash) = stored_row(&env.store(), &id);
    assert!(protected);
    assert!(hash.is_some());
    assert!(!content.contains(MARKER));

    let raw = std::fs::read(env.store()).expect("read store");
    assert!(!String::from_utf8_lossy(&raw).contains(MARKER));
}

#[test]
fn test_show_requires_correct_password() {
    let env = Env::new();
    env.init();
    let id = env.new_note("Diary", MARKER);
    assert_success(&env.run(Some(PASSWORD), &["protect", &id]));

    let output = env.run(Some(PASSWORD), &["show", &id]);
    assert_success(&output);
    assert!(stdout(&output).contains(MARKER));

    let output = env.run(Some("wrong password"), &["show", &id]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("Incorrect password"));
    assert!(!stdout(&output).contains(MARKER));

    let output = env.run(None, &["show", &id]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn test_list_never_shows_protected_content() {
    let env = Env::new();
    env.init();
    let id = env.new_note("Secret", MARKER);
    env.new_note("Groceries", "milk");
    assert_success(&env.run(Some(PASSWORD), &["protect", &id]));

    let output = env.run(None, &["list", "--json"]);
    assert_success(&output);
    let notes: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json");
    let notes = notes.as_array().expect("array");
    assert_eq!(notes.len(), 2);

    let secret = notes
        .iter()
        .find(|n| n["title"] == "Secret")
        .expect("secret listed");
    assert!(secret["content"].is_null());
    assert_eq!(secret["is_password_protected"], true);

    let (envelope, _, _) = stored_row(&env.store(), &id);
    assert!(!stdout(&output).contains(&envelope));
}

#[test]
fn test_edit_protected_note_reencrypts() {
    let env = Env::new();
    env.init();
    let id = env.new_note("Diary", "first draft");
    assert_success(&env.run(Some(PASSWORD), &["protect", &id]));
    let (before, _, _) = stored_row(&env.store(), &id);

    let output = env.run(Some(PASSWORD), &["edit", &id, "--body", MARKER]);
    assert_success(&output);

    let (after, protected, _) = stored_row(&env.store(), &id);
    assert!(protected);
    assert_ne!(before, after);
    assert!(!after.contains(MARKER));

    let output = env.run(Some(PASSWORD), &["show", &id]);
    assert!(stdout(&output).contains(MARKER));
}

#[test]
fn test_duplicate_protected_note_gets_fresh_envelope() {
    let env = Env::new();
    env.init();
    let id = env.new_note("Diary", MARKER);
    assert_success(&env.run(Some(PASSWORD), &["protect", &id]));

    let output = env.run(Some(PASSWORD), &["-q", "duplicate", &id]);
    assert_success(&output);
    let copy_id = stdout(&output).trim().to_string();
    assert_ne!(copy_id, id);

    let (original, _, _) = stored_row(&env.store(), &id);
    let (copy, copy_protected, _) = stored_row(&env.store(), &copy_id);
    assert!(copy_protected);
    assert_ne!(original, copy);

    let output = env.run(Some(PASSWORD), &["show", &copy_id, "--json"]);
    assert_success(&output);
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json");
    assert_eq!(value["title"], "Diary (copy)");
    assert_eq!(value["content"], MARKER);
}

#[test]
fn test_unprotect_restores_plaintext() {
    let env = Env::new();
    env.init();
    let id = env.new_note("Diary", MARKER);
    assert_success(&env.run(Some(PASSWORD), &["protect", &id]));

    let output = env.run(Some("nope"), &["unprotect", &id]);
    assert_eq!(output.status.code(), Some(5));
    let (_, still_protected, _) = stored_row(&env.store(), &id);
    assert!(still_protected);

    assert_success(&env.run(Some(PASSWORD), &["unprotect", &id]));
    let (content, protected, hash) = stored_row(&env.store(), &id);
    assert!(!protected);
    assert!(hash.is_none());
    assert_eq!(content, MARKER);
}

#[test]
fn test_protection_state_errors_use_invalid_input_code() {
    let env = Env::new();
    env.init();
    let id = env.new_note("Plain", "text");

    let output = env.run(Some(PASSWORD), &["unprotect", &id]);
    assert_eq!(output.status.code(), Some(4));

    assert_success(&env.run(Some(PASSWORD), &["protect", &id]));
    let output = env.run(Some(PASSWORD), &["protect", &id]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("already password protected"));
}

#[test]
fn test_id_prefix_resolution() {
    let env = Env::new();
    env.init();
    let id = env.new_note("Prefixed", "body text");

    let output = env.run(None, &["show", &id[..8]]);
    assert_success(&output);
    assert!(stdout(&output).contains("body text"));

    let output = env.run(None, &["show", "abc"]);
    assert_eq!(output.status.code(), Some(4));

    let output = env.run(None, &["show", &uuid_not_in_store(&id)]);
    assert_eq!(output.status.code(), Some(3));
}

fn uuid_not_in_store(existing: &str) -> String {
    let candidate = "00000000-0000-4000-8000-000000000000";
    if existing == candidate {
        "11111111-1111-4111-8111-111111111111".to_string()
    } else {
        candidate.to_string()
    }
}

#[test]
fn test_delete_requires_force_without_tty() {
    let env = Env::new();
    env.init();
    let id = env.new_note("Doomed", "bye");

    let output = env.run(None, &["delete", &id]);
    assert_eq!(output.status.code(), Some(4));

    assert_success(&env.run(None, &["delete", &id, "--force"]));
    let conn = Connection::open(env.store()).expect("open sqlite");
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))
        .expect("count");
    assert_eq!(count, 0);
}

#[test]
fn test_check_passes_on_fresh_store() {
    let env = Env::new();
    env.init();
    let id = env.new_note("Diary", "text");
    assert_success(&env.run(Some(PASSWORD), &["protect", &id]));

    let output = env.run(None, &["check"]);
    assert_success(&output);
    assert!(stdout(&output).contains("Integrity check passed"));
}

#[test]
fn test_new_with_protect_flag() {
    let env = Env::new();
    env.init();
    let output = env.run(
        Some(PASSWORD),
        &["-q", "new", "Locked", "--body", MARKER, "--protect"],
    );
    assert_success(&output);
    let id = stdout(&output).trim().to_string();

    let (content, protected, _) = stored_row(&env.store(), &id);
    assert!(protected);
    assert!(!content.contains(MARKER));
}

#[test]
fn test_completions_generate() {
    let env = Env::new();
    let output = env
        .command(None)
        .args(["completions", "bash"])
        .output()
        .expect("run completions");
    assert_success(&output);
    assert!(stdout(&output).contains("notelock"));
}
