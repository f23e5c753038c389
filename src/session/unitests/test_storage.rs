use std::fs;
use crate::session::storage::{Storage, FileStorage, MemoryStorage};

#[test]
fn test_memory_storage() {
    let mut storage = MemoryStorage::new();
    assert_eq!(storage.get("k"), None);

    storage.set("k", "v").unwrap();
    assert_eq!(storage.get("k").as_deref(), Some("v"));

    storage.remove("k").unwrap();
    assert_eq!(storage.get("k"), None);

    storage.set("a", "1").unwrap();
    storage.set("b", "2").unwrap();
    storage.clear().unwrap();
    assert_eq!(storage.get("a"), None);
    assert_eq!(storage.get("b"), None);
}

#[test]
fn test_file_storage_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested");
    let path = path.to_str().unwrap();

    {
        let mut storage = FileStorage::open(path).unwrap();
        storage.set("@UnimedContatos:token", "abc").unwrap();
        storage.set("other", "x").unwrap();
        storage.remove("other").unwrap();
        assert!(storage.path().exists());
    }

    let storage = FileStorage::open(path).unwrap();
    assert_eq!(storage.get("@UnimedContatos:token").as_deref(), Some("abc"));
    assert_eq!(storage.get("other"), None);
}

#[test]
fn test_file_storage_ignores_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(FileStorage::FILE_NAME), "{ broken").unwrap();

    let mut storage = FileStorage::open(dir.path().to_str().unwrap()).unwrap();
    assert_eq!(storage.get("anything"), None);

    storage.set("k", "v").unwrap();
    let reopened = FileStorage::open(dir.path().to_str().unwrap()).unwrap();
    assert_eq!(reopened.get("k").as_deref(), Some("v"));
}

#[test]
fn test_file_storage_unreadable_file() {
    let dir = tempfile::tempdir().unwrap();
    // A directory in place of the session file cannot be read.
    fs::create_dir(dir.path().join(FileStorage::FILE_NAME)).unwrap();

    let result = FileStorage::open(dir.path().to_str().unwrap());
    assert!(matches!(result, Err(crate::Error::Io(_))));
}
