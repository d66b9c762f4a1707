use thw_storage::*;
use tempfile::TempDir;

async fn open(temp: &TempDir, compression: Compression) -> Storage {
    Storage::builder().root(temp.path()).compression(compression).connect().await.unwrap()
}

#[tokio::test]
async fn test_write_read_roundtrip_uncompressed() {
    let temp = TempDir::new().unwrap();
    let storage = open(&temp, Compression::None).await;

    storage.write("app_settings", b"hello world").await.unwrap();
    assert!(storage.exists("app_settings").await.unwrap());
    assert_eq!(storage.read("app_settings").await.unwrap(), b"hello world");
}

#[tokio::test]
async fn test_write_read_roundtrip_compressed() {
    let temp = TempDir::new().unwrap();
    let storage = open(&temp, Compression::Lz4).await;

    let payload = vec![1u8; 4096];
    storage.write("blob", &payload).await.unwrap();
    assert_eq!(storage.read("blob").await.unwrap(), payload);

    let on_disk = std::fs::metadata(storage.path_of("blob").unwrap()).unwrap().len();
    assert!(on_disk < 4096);
}

#[tokio::test]
async fn test_values_survive_compression_change() {
    let temp = TempDir::new().unwrap();
    open(&temp, Compression::Lz4).await.write("k", b"packed").await.unwrap();

    let plain = open(&temp, Compression::None).await;
    assert_eq!(plain.read("k").await.unwrap(), b"packed");
}

#[tokio::test]
async fn test_missing_key_is_reported() {
    let temp = TempDir::new().unwrap();
    let storage = open(&temp, Compression::None).await;

    assert!(matches!(storage.read("nothing").await, Err(StorageError::KeyNotFound { .. })));
    assert!(matches!(storage.delete("nothing").await, Err(StorageError::KeyNotFound { .. })));
    assert!(!storage.exists("nothing").await.unwrap());
}

#[tokio::test]
async fn test_invalid_keys_never_touch_disk() {
    let temp = TempDir::new().unwrap();
    let storage = open(&temp, Compression::None).await;

    for key in ["../escape", "a/b", ""] {
        assert!(matches!(storage.write(key, b"x").await, Err(StorageError::InvalidKey { .. })));
    }
    assert!(storage.keys().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_overwrite_replaces_value() {
    let temp = TempDir::new().unwrap();
    let storage = open(&temp, Compression::None).await;

    storage.write("k", b"first").await.unwrap();
    storage.write("k", b"second").await.unwrap();
    assert_eq!(storage.read("k").await.unwrap(), b"second");
    assert_eq!(storage.keys().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_and_keys() {
    let temp = TempDir::new().unwrap();
    let storage = open(&temp, Compression::None).await;

    storage.write("b", b"2").await.unwrap();
    storage.write("a", b"1").await.unwrap();
    let keys: Vec<String> =
        storage.keys().await.unwrap().iter().map(|k| k.as_str().to_owned()).collect();
    assert_eq!(keys, ["a", "b"]);

    storage.delete("a").await.unwrap();
    assert!(!storage.exists("a").await.unwrap());
    assert_eq!(storage.keys().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_root_without_create() {
    let temp = TempDir::new().unwrap();
    let result = Storage::builder().root(temp.path().join("absent")).create(false).connect().await;
    assert!(matches!(result, Err(StorageError::RootNotFound { .. })));
}

#[tokio::test]
async fn test_concurrent_writes_leave_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let storage = open(&temp, Compression::None).await;

    let mut handles = Vec::new();
    for i in 0..16u8 {
        let storage = storage.clone();
        handles.push(tokio::spawn(async move { storage.write("shared", &[i; 32]).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let value = storage.read("shared").await.unwrap();
    assert_eq!(value.len(), 32);
    assert!(value.iter().all(|b| *b == value[0]));

    let leftovers = std::fs::read_dir(storage.root())
        .unwrap()
        .flatten()
        .filter(|e| e.file_name().to_string_lossy().contains(".thwtmp."))
        .count();
    assert_eq!(leftovers, 0);
}

#[tokio::test]
async fn test_failed_write_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    let storage = open(&temp, Compression::None).await;

    // A non-empty directory squatting on the value path makes the rename fail.
    let blocked = storage.path_of("blocked").unwrap();
    std::fs::create_dir(&blocked).unwrap();
    std::fs::write(blocked.join("keep"), b"x").unwrap();

    let result = storage.write("blocked", b"value").await;
    assert!(matches!(result, Err(StorageError::Io { .. })));
    assert!(blocked.join("keep").exists());

    let leftovers = std::fs::read_dir(storage.root())
        .unwrap()
        .flatten()
        .filter(|e| e.file_name().to_string_lossy().contains(".thwtmp."))
        .count();
    assert_eq!(leftovers, 0);
}
