//! In-memory storage backend implementation for the storefront.
//!
//! This module provides a memory-based implementation of the
//! StorageInterface trait, useful for testing and development scenarios
//! where persistence across restarts is not required. Versioning is fully
//! supported so compare-and-swap semantics behave the same as a durable
//! backend.

use crate::{StorageError, StorageInterface};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A stored value with its version counter.
#[derive(Debug, Clone)]
struct Entry {
	data: Vec<u8>,
	version: u64,
}

/// In-memory storage implementation.
///
/// This implementation stores data in a HashMap behind a read-write lock,
/// providing fast access but no persistence across restarts. Versions start
/// at 1 on first write and increase by one per write.
pub struct MemoryStorage {
	/// The in-memory store protected by a read-write lock.
	store: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryStorage {
	/// Creates a new MemoryStorage instance.
	pub fn new() -> Self {
		Self {
			store: Arc::new(RwLock::new(HashMap::new())),
		}
	}
}

impl Default for MemoryStorage {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl StorageInterface for MemoryStorage {
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError> {
		let store = self.store.read().await;
		store
			.get(key)
			.map(|e| e.data.clone())
			.ok_or(StorageError::NotFound)
	}

	async fn get_bytes_versioned(&self, key: &str) -> Result<(Vec<u8>, u64), StorageError> {
		let store = self.store.read().await;
		store
			.get(key)
			.map(|e| (e.data.clone(), e.version))
			.ok_or(StorageError::NotFound)
	}

	async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
		let mut store = self.store.write().await;
		let version = store.get(key).map(|e| e.version).unwrap_or(0) + 1;
		store.insert(key.to_string(), Entry {
			data: value,
			version,
		});
		Ok(())
	}

	async fn compare_and_set_bytes(
		&self,
		key: &str,
		value: Vec<u8>,
		expected_version: u64,
	) -> Result<u64, StorageError> {
		// Read and write under one lock so the check is atomic.
		let mut store = self.store.write().await;
		let found = store.get(key).map(|e| e.version).unwrap_or(0);
		if found != expected_version {
			return Err(StorageError::VersionConflict {
				expected: expected_version,
				found,
			});
		}
		let version = found + 1;
		store.insert(key.to_string(), Entry {
			data: value,
			version,
		});
		Ok(version)
	}

	async fn delete(&self, key: &str) -> Result<(), StorageError> {
		let mut store = self.store.write().await;
		store.remove(key);
		Ok(())
	}

	async fn exists(&self, key: &str) -> Result<bool, StorageError> {
		let store = self.store.read().await;
		Ok(store.contains_key(key))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_basic_operations() {
		let storage = MemoryStorage::new();

		// Test set and get
		let key = "test_key";
		let value = b"test_value".to_vec();
		storage.set_bytes(key, value.clone()).await.unwrap();

		let retrieved = storage.get_bytes(key).await.unwrap();
		assert_eq!(retrieved, value);

		// Test exists
		assert!(storage.exists(key).await.unwrap());

		// Test delete
		storage.delete(key).await.unwrap();
		assert!(!storage.exists(key).await.unwrap());

		// Test get after delete
		let result = storage.get_bytes(key).await;
		assert!(matches!(result, Err(StorageError::NotFound)));
	}

	#[tokio::test]
	async fn test_versions_increase_per_write() {
		let storage = MemoryStorage::new();
		let key = "versioned";

		storage.set_bytes(key, b"v1".to_vec()).await.unwrap();
		let (_, v1) = storage.get_bytes_versioned(key).await.unwrap();
		assert_eq!(v1, 1);

		storage.set_bytes(key, b"v2".to_vec()).await.unwrap();
		let (data, v2) = storage.get_bytes_versioned(key).await.unwrap();
		assert_eq!(v2, 2);
		assert_eq!(data, b"v2".to_vec());
	}

	#[tokio::test]
	async fn test_compare_and_set() {
		let storage = MemoryStorage::new();
		let key = "cas_key";

		// First write against version 0 (missing key)
		let v = storage
			.compare_and_set_bytes(key, b"a".to_vec(), 0)
			.await
			.unwrap();
		assert_eq!(v, 1);

		// Stale expected version is rejected and leaves the value untouched
		let err = storage
			.compare_and_set_bytes(key, b"b".to_vec(), 0)
			.await
			.unwrap_err();
		assert!(matches!(
			err,
			StorageError::VersionConflict {
				expected: 0,
				found: 1
			}
		));
		assert_eq!(storage.get_bytes(key).await.unwrap(), b"a".to_vec());

		// Matching expected version succeeds
		let v = storage
			.compare_and_set_bytes(key, b"b".to_vec(), 1)
			.await
			.unwrap();
		assert_eq!(v, 2);
	}
}
