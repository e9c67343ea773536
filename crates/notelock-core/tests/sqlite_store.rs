use notelock_core::crypto::decrypt;
use notelock_core::{NoteStore, Notebook, SqliteNoteStore};
use tempfile::tempdir;

const PASSWORD: &str = "test-password-secure-123";

#[test]
fn test_session_changes_persist_encrypted() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("notes.db");
    let mut store = SqliteNoteStore::create(&path).expect("create should succeed");

    let mut notebook = Notebook::new();
    let id = notebook.create("Journal", "first draft");
    let note = notebook.protect(&id, PASSWORD).expect("protect should succeed");
    store.save_note(note).expect("save should succeed");

    notebook.unlock(&id, PASSWORD).expect("unlock should succeed");
    let note = notebook
        .update_content(&id, "second draft PLAINTEXT_MARKER")
        .expect("update should succeed");
    store.save_note(note).expect("save should succeed");
    drop(store);

    let raw = std::fs::read(&path).expect("read should succeed");
    let haystack = String::from_utf8_lossy(&raw);
    assert!(!haystack.contains("PLAINTEXT_MARKER"));
    assert!(!haystack.contains("first draft"));

    let store = SqliteNoteStore::open(&path).expect("open should succeed");
    let persisted = store.get_note(&id).unwrap().expect("note exists");
    assert!(persisted.is_password_protected);
    assert_eq!(
        decrypt(&persisted.content, PASSWORD).unwrap(),
        "second draft PLAINTEXT_MARKER"
    );
}

#[test]
fn test_reloaded_session_starts_locked() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("notes.db");
    let mut store = SqliteNoteStore::create(&path).expect("create should succeed");

    let mut notebook = Notebook::new();
    let id = notebook.create("Journal", "Hello world");
    store.save_note(notebook.protect(&id, PASSWORD).unwrap()).unwrap();
    notebook.unlock(&id, PASSWORD).unwrap();
    assert!(notebook.is_unlocked(&id));
    drop(notebook);

    let reloaded = Notebook::from_notes(store.list_notes().unwrap());
    assert!(!reloaded.is_unlocked(&id));
    assert!(reloaded.read(&id).is_err());
}

#[test]
fn test_unprotect_persists_plaintext_without_hash() {
    let dir = tempdir().expect("tempdir");
    let mut store = SqliteNoteStore::create(&dir.path().join("notes.db")).unwrap();

    let mut notebook = Notebook::new();
    let id = notebook.create("Journal", "Hello world");
    store.save_note(notebook.protect(&id, PASSWORD).unwrap()).unwrap();
    store
        .save_note(notebook.unprotect(&id, Some(PASSWORD)).unwrap())
        .unwrap();

    let persisted = store.get_note(&id).unwrap().unwrap();
    assert!(!persisted.is_password_protected);
    assert!(persisted.password_hash.is_none());
    assert_eq!(persisted.content, "Hello world");
    assert!(store.check_integrity().is_ok());
}
