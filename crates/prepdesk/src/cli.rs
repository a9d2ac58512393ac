//! Command-line interface definitions using clap.

use clap::{Parser, Subcommand};

/// Prepdesk content shelf
///
/// A repository-local CLI for managing exam-prep study materials: notes,
/// PDFs, previous-year questions, videos, and mind maps. Content bodies live
/// on external hosts; records store an opaque URL that is normalized into an
/// embeddable link at display time.
///
/// Exit Codes:
///   0  - Command succeeded
///   1  - Generic error occurred
///   2  - Invalid arguments or usage error
///   3  - Resource not found (material, subject, etc.)
///   4  - Validation failed (blank field, unknown subject, etc.)
///   5  - Permission denied
///   6  - Resource already exists
///  10  - External dependency failed (file system, etc.)
#[derive(Parser)]
#[command(name = "prepdesk")]
#[command(about = "Exam-prep content shelf", long_about = None)]
pub struct Cli {
    /// Suppress non-essential output (for scripting)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Acting account id (defaults to PREPDESK_ACTOR, then "local")
    #[arg(long, global = true)]
    pub actor: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the content shelf in the current directory
    Init,

    /// Add a new material
    Add {
        #[arg(short, long)]
        title: String,

        /// Subject id from the catalog (see 'prepdesk subjects')
        #[arg(short, long)]
        subject: String,

        /// Content type: notes, pyq, video, mindmap, or pdf
        #[arg(short = 'c', long = "type")]
        content_type: String,

        /// Sharing link from the content host (Drive, Docs, or video URL)
        #[arg(short, long)]
        url: String,

        /// Create the material hidden from public surfaces
        #[arg(long)]
        hidden: bool,

        #[arg(long)]
        json: bool,
    },

    /// List materials
    List {
        /// Filter by content type
        #[arg(short = 'c', long = "type")]
        content_type: Option<String>,

        /// Filter by subject id
        #[arg(short, long)]
        subject: Option<String>,

        /// Include hidden materials
        #[arg(long)]
        all: bool,

        #[arg(long)]
        json: bool,
    },

    /// Show one material with its embeddable link
    Show {
        /// Material id or unique prefix (min 4 characters)
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Toggle public visibility of a material
    Visibility {
        /// Material id or unique prefix
        id: String,

        /// New visibility: on or off
        #[arg(value_parser = ["on", "off"])]
        state: String,

        #[arg(long)]
        json: bool,
    },

    /// Update material metadata
    Update {
        /// Material id or unique prefix
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        subject: Option<String>,

        #[arg(short, long)]
        url: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Delete a material
    Delete {
        /// Material id or unique prefix
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Show the subject catalog
    Subjects {
        #[arg(long)]
        json: bool,
    },

    /// Normalize a sharing link into its embeddable form
    Embed {
        /// The sharing URL to normalize
        url: String,

        #[arg(long)]
        json: bool,
    },

    /// Show the audit log
    Events {
        /// Keep only the most recent N entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Show events for one material only
        #[arg(long)]
        material: Option<String>,

        #[arg(long)]
        json: bool,
    },
}
