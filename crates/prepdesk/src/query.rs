//! Typed material queries.
//!
//! Every listing surface (CLI, public API, admin API) goes through
//! [`MaterialQuery`] instead of building its own filter, so the
//! content-type/subject/visibility semantics live in exactly one place.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::domain::{ContentType, Material};

/// Error for unrecognized filter values in CLI arguments and query strings.
#[derive(Debug, Error)]
pub enum ParseFilterError {
    #[error("unknown content type: '{0}' (expected notes, pyq, video, mindmap, or pdf)")]
    ContentType(String),
    #[error("unknown visibility filter: '{0}' (expected visible or all)")]
    Visibility(String),
}

/// Which records a query may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityFilter {
    /// Only publicly visible records (browsing surfaces)
    #[default]
    VisibleOnly,
    /// All records regardless of visibility (admin surfaces)
    All,
}

impl FromStr for VisibilityFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "visible" => Ok(VisibilityFilter::VisibleOnly),
            "all" => Ok(VisibilityFilter::All),
            other => Err(ParseFilterError::Visibility(other.to_string())),
        }
    }
}

/// Filter over the material shelf.
///
/// Defaults to "everything a student may see": all content types, all
/// subjects, visible records only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialQuery {
    content_type: Option<ContentType>,
    subject: Option<String>,
    visibility: VisibilityFilter,
}

impl MaterialQuery {
    /// Create an unrestricted public query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one content type.
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Restrict to one subject id.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Include hidden records (admin surfaces only).
    pub fn include_hidden(mut self) -> Self {
        self.visibility = VisibilityFilter::All;
        self
    }

    /// The content-type restriction, if any.
    pub fn content_type(&self) -> Option<ContentType> {
        self.content_type
    }

    /// The subject restriction, if any.
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// The visibility restriction.
    pub fn visibility(&self) -> VisibilityFilter {
        self.visibility
    }

    /// Whether a material satisfies this query.
    pub fn matches(&self, material: &Material) -> bool {
        if let Some(content_type) = self.content_type {
            if material.content_type != content_type {
                return false;
            }
        }
        if let Some(ref subject) = self.subject {
            if &material.subject != subject {
                return false;
            }
        }
        match self.visibility {
            VisibilityFilter::VisibleOnly => material.visible,
            VisibilityFilter::All => true,
        }
    }
}
