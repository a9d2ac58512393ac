//! JSON file-based storage implementation.
//!
//! All data is stored as JSON files in a `data/` directory with atomic writes.

use crate::domain::{Event, Material};
use crate::storage::MaterialStore;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

const MATERIALS_DIR: &str = "data/materials";
const INDEX_FILE: &str = "data/index.json";
const EVENTS_FILE: &str = "data/events.jsonl";

/// Index of all materials in the repository
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Index {
    /// Schema version for future migrations
    schema_version: u32,
    /// List of all material IDs
    all_ids: Vec<String>,
}

impl Default for Index {
    fn default() -> Self {
        Self {
            schema_version: 1,
            all_ids: Vec::new(),
        }
    }
}

/// JSON file-based storage for materials and events.
///
/// Each material is a separate JSON file in `data/materials/`, with an id
/// index in `data/index.json` and an append-only event log in
/// `data/events.jsonl`. All file writes are atomic (write to temp file,
/// then rename).
#[derive(Clone)]
pub struct JsonFileStorage {
    root: PathBuf,
}

impl JsonFileStorage {
    /// Create a new JSON file storage instance at the given root path
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Check that an initialized repository exists at the root.
    ///
    /// Used by long-running processes (the API server) to fail fast with a
    /// clear message instead of erroring on the first request.
    pub fn validate(&self) -> Result<()> {
        let index_path = self.root.join(INDEX_FILE);
        if !index_path.exists() {
            anyhow::bail!(
                "No prepdesk repository at {} (missing {})",
                self.root.display(),
                INDEX_FILE
            );
        }
        Ok(())
    }

    fn material_path(&self, id: &str) -> PathBuf {
        self.root.join(MATERIALS_DIR).join(format!("{}.json", id))
    }

    fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data).context("Failed to serialize data")?;

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json).context("Failed to write temporary file")?;
        fs::rename(&temp_path, path).context("Failed to rename temporary file")?;

        Ok(())
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, path: &Path) -> Result<T> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        serde_json::from_str(&contents).context("Failed to deserialize data")
    }

    fn load_index(&self) -> Result<Index> {
        let index_path = self.root.join(INDEX_FILE);
        self.read_json(&index_path)
    }

    fn save_index(&self, index: &Index) -> Result<()> {
        let index_path = self.root.join(INDEX_FILE);
        self.write_json(&index_path, index)
    }
}

impl MaterialStore for JsonFileStorage {
    fn init(&self) -> Result<()> {
        let materials_dir = self.root.join(MATERIALS_DIR);

        fs::create_dir_all(&materials_dir).context("Failed to create materials directory")?;

        // Create index.json if it doesn't exist
        let index_path = self.root.join(INDEX_FILE);
        if !index_path.exists() {
            let index = Index::default();
            self.write_json(&index_path, &index)?;
        }

        // Create events.jsonl if it doesn't exist
        let events_path = self.root.join(EVENTS_FILE);
        if !events_path.exists() {
            fs::File::create(&events_path).context("Failed to create events file")?;
        }

        Ok(())
    }

    fn save_material(&self, material: &Material) -> Result<()> {
        let material_path = self.material_path(&material.id);
        self.write_json(&material_path, material)?;

        // Update index
        let mut index = self.load_index()?;
        if !index.all_ids.contains(&material.id) {
            index.all_ids.push(material.id.clone());
            self.save_index(&index)?;
        }

        Ok(())
    }

    fn load_material(&self, id: &str) -> Result<Material> {
        let material_path = self.material_path(id);
        if !material_path.exists() {
            return Err(crate::errors::material_not_found(id).into());
        }
        self.read_json(&material_path)
    }

    fn delete_material(&self, id: &str) -> Result<()> {
        let material_path = self.material_path(id);
        if !material_path.exists() {
            return Err(crate::errors::material_not_found(id).into());
        }
        fs::remove_file(&material_path).context("Failed to delete material file")?;

        // Update index
        let mut index = self.load_index()?;
        index.all_ids.retain(|i| i != id);
        self.save_index(&index)?;

        Ok(())
    }

    fn list_materials(&self) -> Result<Vec<Material>> {
        let index = self.load_index()?;
        index
            .all_ids
            .iter()
            .map(|id| self.load_material(id))
            .collect()
    }

    fn append_event(&self, event: &Event) -> Result<()> {
        let events_path = self.root.join(EVENTS_FILE);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&events_path)
            .context("Failed to open events file")?;

        let json = serde_json::to_string(event).context("Failed to serialize event")?;
        writeln!(file, "{}", json).context("Failed to write event")?;
        Ok(())
    }

    fn read_events(&self) -> Result<Vec<Event>> {
        let events_path = self.root.join(EVENTS_FILE);
        if !events_path.exists() {
            return Ok(Vec::new());
        }

        let file = fs::File::open(&events_path).context("Failed to open events file")?;
        let reader = BufReader::new(file);

        let mut events = Vec::new();
        for line in reader.lines() {
            let line = line.context("Failed to read line from events file")?;
            if line.trim().is_empty() {
                continue;
            }
            let event: Event =
                serde_json::from_str(&line).context("Failed to deserialize event")?;
            events.push(event);
        }

        Ok(events)
    }

    fn root(&self) -> &Path {
        &self.root
    }
}
