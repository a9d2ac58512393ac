//! Core domain types for the content shelf.
//!
//! This module defines the fundamental data structures used throughout the
//! system: materials (content records), content types, and audit events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::query::ParseFilterError;

/// Kind of study material a record points to.
///
/// The wire names (`notes`, `pyq`, `video`, `mindmap`, `pdf`) are part of
/// the stored format and must stay stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Chapter notes rendered in an embedded document viewer
    Notes,
    /// Previous-year question papers
    Pyq,
    /// Hosted video lectures
    Video,
    /// Mind-map images displayed inline
    MindMap,
    /// Standalone PDF documents
    Pdf,
}

impl ContentType {
    /// All content types, in display order.
    pub const ALL: [ContentType; 5] = [
        ContentType::Notes,
        ContentType::Pyq,
        ContentType::Video,
        ContentType::MindMap,
        ContentType::Pdf,
    ];

    /// Stable string form used on the wire and in CLI arguments.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Notes => "notes",
            ContentType::Pyq => "pyq",
            ContentType::Video => "video",
            ContentType::MindMap => "mindmap",
            ContentType::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notes" => Ok(ContentType::Notes),
            "pyq" => Ok(ContentType::Pyq),
            "video" => Ok(ContentType::Video),
            "mindmap" => Ok(ContentType::MindMap),
            "pdf" => Ok(ContentType::Pdf),
            other => Err(ParseFilterError::ContentType(other.to_string())),
        }
    }
}

/// One piece of study material.
///
/// The content body lives on an external host; the record stores only an
/// opaque URL plus the metadata needed to browse and administer it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    /// Unique identifier (UUID)
    pub id: String,
    /// Display title
    pub title: String,
    /// Subject id from the subject catalog (e.g. "physics")
    pub subject: String,
    /// Content type discriminator
    #[serde(rename = "contentType")]
    pub content_type: ContentType,
    /// Externally hosted content reference; opaque, never mutated
    pub url: String,
    /// Whether the record appears on public browsing surfaces
    pub visible: bool,
    /// Account id of the administrator who added the record
    #[serde(rename = "createdBy")]
    pub created_by: String,
    /// When the record was added
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Material {
    /// Create a new visible material with a fresh id.
    pub fn new(
        title: String,
        subject: String,
        content_type: ContentType,
        url: String,
        created_by: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            subject,
            content_type,
            url,
            visible: true,
            created_by,
            created_at: Utc::now(),
        }
    }

    /// First 8 characters of the id, for human-facing listings.
    pub fn short_id(&self) -> &str {
        &self.id[..self.id.len().min(8)]
    }
}

/// Audit log entries for content administration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A material was added to the shelf
    MaterialAdded {
        /// Event ID
        id: String,
        /// Material that was added
        material_id: String,
        /// When this occurred
        timestamp: DateTime<Utc>,
        /// Material title
        title: String,
        /// Material content type
        content_type: ContentType,
        /// Who added it
        created_by: String,
    },
    /// A material's public visibility was toggled
    VisibilityChanged {
        /// Event ID
        id: String,
        /// Material that changed
        material_id: String,
        /// When this occurred
        timestamp: DateTime<Utc>,
        /// New visibility
        visible: bool,
    },
    /// A material's metadata was edited
    MaterialUpdated {
        /// Event ID
        id: String,
        /// Material that changed
        material_id: String,
        /// When this occurred
        timestamp: DateTime<Utc>,
    },
    /// A material was removed
    MaterialDeleted {
        /// Event ID
        id: String,
        /// Material that was removed
        material_id: String,
        /// When this occurred
        timestamp: DateTime<Utc>,
    },
}

impl Event {
    /// Create a material added event
    pub fn new_material_added(material: &Material) -> Self {
        Event::MaterialAdded {
            id: Uuid::new_v4().to_string(),
            material_id: material.id.clone(),
            timestamp: Utc::now(),
            title: material.title.clone(),
            content_type: material.content_type,
            created_by: material.created_by.clone(),
        }
    }

    /// Create a visibility changed event
    pub fn new_visibility_changed(material_id: String, visible: bool) -> Self {
        Event::VisibilityChanged {
            id: Uuid::new_v4().to_string(),
            material_id,
            timestamp: Utc::now(),
            visible,
        }
    }

    /// Create a material updated event
    pub fn new_material_updated(material_id: String) -> Self {
        Event::MaterialUpdated {
            id: Uuid::new_v4().to_string(),
            material_id,
            timestamp: Utc::now(),
        }
    }

    /// Create a material deleted event
    pub fn new_material_deleted(material_id: String) -> Self {
        Event::MaterialDeleted {
            id: Uuid::new_v4().to_string(),
            material_id,
            timestamp: Utc::now(),
        }
    }

    /// Get the material ID associated with this event
    pub fn material_id(&self) -> &str {
        match self {
            Event::MaterialAdded { material_id, .. } => material_id,
            Event::VisibilityChanged { material_id, .. } => material_id,
            Event::MaterialUpdated { material_id, .. } => material_id,
            Event::MaterialDeleted { material_id, .. } => material_id,
        }
    }

    /// Get the event type as a string
    pub fn kind(&self) -> &'static str {
        match self {
            Event::MaterialAdded { .. } => "material_added",
            Event::VisibilityChanged { .. } => "visibility_changed",
            Event::MaterialUpdated { .. } => "material_updated",
            Event::MaterialDeleted { .. } => "material_deleted",
        }
    }
}
