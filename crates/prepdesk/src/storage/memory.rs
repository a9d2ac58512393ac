//! In-memory storage implementation for testing.
//!
//! This backend stores all data in RAM, trading persistence for fast,
//! isolated test execution. Clones share the same underlying data, and the
//! shared state is `Send + Sync` so the backend also serves the API test
//! harness.

use crate::domain::{Event, Material};
use crate::storage::MaterialStore;
use anyhow::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Inner {
    materials: HashMap<String, Material>,
    events: Vec<Event>,
}

/// In-memory storage backend.
///
/// All data is lost when the last clone is dropped. Uses `Arc<Mutex<_>>`
/// for shared interior mutability: clones operate on the same data.
///
/// # Examples
///
/// ```
/// use prepdesk::domain::{ContentType, Material};
/// use prepdesk::storage::{InMemoryStorage, MaterialStore};
///
/// let storage = InMemoryStorage::new();
/// storage.init().unwrap();
///
/// let material = Material::new(
///     "Cell structure".to_string(),
///     "biology".to_string(),
///     ContentType::Notes,
///     "https://example.com/cells".to_string(),
///     "admin".to_string(),
/// );
/// storage.save_material(&material).unwrap();
///
/// let loaded = storage.load_material(&material.id).unwrap();
/// assert_eq!(loaded.title, "Cell structure");
/// ```
#[derive(Clone)]
pub struct InMemoryStorage {
    inner: Arc<Mutex<Inner>>,
    root: PathBuf,
}

impl InMemoryStorage {
    /// Create a new in-memory storage instance.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            root: PathBuf::from(":memory:"),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialStore for InMemoryStorage {
    fn init(&self) -> Result<()> {
        // No initialization needed for in-memory storage
        Ok(())
    }

    fn save_material(&self, material: &Material) -> Result<()> {
        self.inner
            .lock()
            .expect("storage mutex poisoned")
            .materials
            .insert(material.id.clone(), material.clone());
        Ok(())
    }

    fn load_material(&self, id: &str) -> Result<Material> {
        self.inner
            .lock()
            .expect("storage mutex poisoned")
            .materials
            .get(id)
            .cloned()
            .ok_or_else(|| crate::errors::material_not_found(id).into())
    }

    fn delete_material(&self, id: &str) -> Result<()> {
        self.inner
            .lock()
            .expect("storage mutex poisoned")
            .materials
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| crate::errors::material_not_found(id).into())
    }

    fn list_materials(&self) -> Result<Vec<Material>> {
        Ok(self
            .inner
            .lock()
            .expect("storage mutex poisoned")
            .materials
            .values()
            .cloned()
            .collect())
    }

    fn append_event(&self, event: &Event) -> Result<()> {
        self.inner
            .lock()
            .expect("storage mutex poisoned")
            .events
            .push(event.clone());
        Ok(())
    }

    fn read_events(&self) -> Result<Vec<Event>> {
        Ok(self
            .inner
            .lock()
            .expect("storage mutex poisoned")
            .events
            .clone())
    }

    fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContentType;

    fn sample(title: &str) -> Material {
        Material::new(
            title.to_string(),
            "biology".to_string(),
            ContentType::Video,
            "https://youtu.be/abc123".to_string(),
            "admin".to_string(),
        )
    }

    #[test]
    fn test_init_is_noop() {
        let storage = InMemoryStorage::new();
        storage.init().unwrap();
        storage.init().unwrap(); // Should be idempotent
    }

    #[test]
    fn test_save_and_load_material() {
        let storage = InMemoryStorage::new();
        storage.init().unwrap();

        let material = sample("Genetics intro");
        storage.save_material(&material).unwrap();

        let loaded = storage.load_material(&material.id).unwrap();
        assert_eq!(loaded, material);
    }

    #[test]
    fn test_save_updates_existing_material() {
        let storage = InMemoryStorage::new();
        storage.init().unwrap();

        let mut material = sample("Original");
        storage.save_material(&material).unwrap();

        material.title = "Updated".to_string();
        storage.save_material(&material).unwrap();

        let loaded = storage.load_material(&material.id).unwrap();
        assert_eq!(loaded.title, "Updated");
        assert_eq!(storage.list_materials().unwrap().len(), 1);
    }

    #[test]
    fn test_load_nonexistent_material_fails() {
        let storage = InMemoryStorage::new();
        storage.init().unwrap();

        let result = storage.load_material("nonexistent");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_delete_material() {
        let storage = InMemoryStorage::new();
        storage.init().unwrap();

        let material = sample("Delete me");
        storage.save_material(&material).unwrap();

        storage.delete_material(&material.id).unwrap();
        assert!(storage.load_material(&material.id).is_err());
    }

    #[test]
    fn test_delete_nonexistent_material_fails() {
        let storage = InMemoryStorage::new();
        storage.init().unwrap();

        assert!(storage.delete_material("nonexistent").is_err());
    }

    #[test]
    fn test_event_log_operations() {
        let storage = InMemoryStorage::new();
        storage.init().unwrap();

        let material = sample("Event test");
        storage
            .append_event(&Event::new_material_added(&material))
            .unwrap();
        storage
            .append_event(&Event::new_material_deleted(material.id.clone()))
            .unwrap();

        let events = storage.read_events().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].kind(), "material_deleted");
    }

    #[test]
    fn test_clone_shares_storage() {
        let storage1 = InMemoryStorage::new();
        storage1.init().unwrap();

        let material1 = sample("In storage 1");
        storage1.save_material(&material1).unwrap();

        // Clone shares the same underlying storage
        let storage2 = storage1.clone();
        let loaded = storage2.load_material(&material1.id).unwrap();
        assert_eq!(loaded.title, "In storage 1");

        let material2 = sample("In storage 2");
        storage2.save_material(&material2).unwrap();

        // Both see the same data
        assert_eq!(storage1.list_materials().unwrap().len(), 2);
        assert_eq!(storage2.list_materials().unwrap().len(), 2);
    }
}
