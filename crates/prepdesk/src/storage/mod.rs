//! Storage abstraction layer for persisting materials and events.
//!
//! This module defines the `MaterialStore` trait that abstracts storage
//! operations, allowing different backends (JSON files, in-memory, etc.)
//! to be used interchangeably.

use crate::domain::{Event, Material};
use anyhow::Result;

pub mod json;
pub mod memory;

// Re-export for convenience
pub use json::JsonFileStorage;
pub use memory::InMemoryStorage;

/// Trait for storage backends that persist materials and events.
///
/// This trait decouples the core business logic from the specific storage
/// implementation. Implementations must be `Clone` to support shared access
/// patterns.
///
/// # Examples
///
/// ```no_run
/// use prepdesk::domain::{ContentType, Material};
/// use prepdesk::storage::{JsonFileStorage, MaterialStore};
///
/// let storage = JsonFileStorage::new(".prepdesk");
/// storage.init().unwrap();
///
/// let material = Material::new(
///     "Laws of Motion".to_string(),
///     "physics".to_string(),
///     ContentType::Notes,
///     "https://drive.google.com/file/d/abc/view".to_string(),
///     "admin".to_string(),
/// );
/// storage.save_material(&material).unwrap();
///
/// let loaded = storage.load_material(&material.id).unwrap();
/// assert_eq!(loaded.title, "Laws of Motion");
/// ```
pub trait MaterialStore: Clone {
    /// Initialize the storage backend (idempotent).
    ///
    /// Creates necessary directories and files.
    fn init(&self) -> Result<()>;

    /// Save a material (create or update).
    ///
    /// # Errors
    ///
    /// Returns an error if the material cannot be serialized or persisted.
    fn save_material(&self, material: &Material) -> Result<()>;

    /// Load a material by full ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the material does not exist or cannot be
    /// deserialized.
    fn load_material(&self, id: &str) -> Result<Material>;

    /// Resolve a partial material ID to its full UUID.
    ///
    /// Accepts either a full UUID or a unique prefix (minimum 4 characters).
    ///
    /// # Errors
    ///
    /// - Prefix too short (< 4 chars)
    /// - No matching material found
    /// - Multiple materials match (ambiguous)
    fn resolve_material_id(&self, partial_id: &str) -> Result<String> {
        if partial_id.len() < 4 {
            anyhow::bail!("Material ID prefix must be at least 4 characters");
        }

        let mut matches: Vec<String> = self
            .list_materials()?
            .into_iter()
            .map(|m| m.id)
            .filter(|id| id.starts_with(partial_id))
            .collect();

        match matches.len() {
            0 => Err(crate::errors::material_not_found(partial_id).into()),
            1 => Ok(matches.swap_remove(0)),
            _ => anyhow::bail!(
                "Ambiguous ID '{}' matches multiple materials: {}",
                partial_id,
                matches
                    .iter()
                    .map(|id| &id[..8])
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    /// Delete a material by full ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the material does not exist or cannot be deleted.
    fn delete_material(&self, id: &str) -> Result<()>;

    /// List all materials in the repository.
    ///
    /// # Errors
    ///
    /// Returns an error if materials cannot be loaded.
    fn list_materials(&self) -> Result<Vec<Material>>;

    /// Append an event to the audit log.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be appended.
    fn append_event(&self, event: &Event) -> Result<()>;

    /// Read all events from the audit log.
    ///
    /// # Errors
    ///
    /// Returns an error if events cannot be read.
    fn read_events(&self) -> Result<Vec<Event>>;

    /// Get the root directory path for this storage backend.
    ///
    /// For file-based storage, this is the data directory; the in-memory
    /// backend returns a placeholder path.
    fn root(&self) -> &std::path::Path;
}
