use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thw_kernel::{StorageCapability, StorageCapabilityExt, StorageFailure};

#[derive(Default)]
struct MapStore {
    values: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl StorageCapability for MapStore {
    fn name(&self) -> &str {
        "map"
    }

    async fn load_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, StorageFailure> {
        Ok(self.values.lock().get(key).cloned())
    }

    async fn save_bytes(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageFailure> {
        self.values.lock().insert(key.to_owned(), bytes);
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    visits: u32,
}

#[tokio::test]
async fn missing_key_is_none() {
    let store = MapStore::default();
    assert_eq!(store.load::<Profile>("profile").await.unwrap(), None);
}

#[tokio::test]
async fn typed_values_round_trip_as_json() {
    let store = MapStore::default();
    let profile = Profile { name: "ada".to_owned(), visits: 3 };
    store.save(&profile, "profile").await.unwrap();

    let raw = store.load_bytes("profile").await.unwrap().unwrap();
    assert_eq!(raw, br#"{"name":"ada","visits":3}"#);
    assert_eq!(store.load::<Profile>("profile").await.unwrap(), Some(profile));
}

#[tokio::test]
async fn undecodable_value_is_a_serialization_failure() {
    let store = MapStore::default();
    store.save_bytes("profile", b"not json".to_vec()).await.unwrap();

    let err = store.load::<Profile>("profile").await.unwrap_err();
    assert!(matches!(err, StorageFailure::Serialization { .. }));
    assert!(err.to_string().contains("profile"));
}

#[tokio::test]
async fn ext_methods_work_through_trait_objects() {
    let store: std::sync::Arc<dyn StorageCapability> = std::sync::Arc::new(MapStore::default());
    store.save(&7_u32, "n").await.unwrap();
    assert_eq!(store.load::<u32>("n").await.unwrap(), Some(7));
}
