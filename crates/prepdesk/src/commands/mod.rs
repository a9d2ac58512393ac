//! Command execution logic for all CLI and API operations.
//!
//! The `CommandExecutor` holds the business logic for content management
//! and event logging, generic over the storage backend.
//!
//! This module is organized into submodules by functional area:
//! - `material`: Material CRUD operations and visibility management
//! - `events`: Audit log operations

mod events;
mod material;

// Common imports used across modules
use crate::access::AccessPolicy;
use crate::config::PrepConfig;
use crate::domain::{ContentType, Event, Material};
use crate::query::MaterialQuery;
use crate::storage::MaterialStore;
use anyhow::{anyhow, Result};

/// Executes commands with business logic and validation.
///
/// Generic over storage backend to support different implementations
/// (JSON files, in-memory, etc.).
pub struct CommandExecutor<S: MaterialStore> {
    storage: S,
}

impl<S: MaterialStore> CommandExecutor<S> {
    /// Create a new command executor with the given storage
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Get reference to the storage backend
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Initialize a new prepdesk repository at the storage root
    pub fn init(&self) -> Result<()> {
        self.storage.init()
    }

    /// Load the access policy from the repository configuration.
    pub fn access_policy(&self) -> Result<AccessPolicy> {
        let config = PrepConfig::load(self.storage.root())?;
        Ok(AccessPolicy::from_config(&config))
    }
}
