//! Knowledge base type definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An immutable source document: one markdown guideline file.
///
/// Loaded once when the knowledge base is built; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Path of the markdown file on disk
    pub path: PathBuf,

    /// Full UTF-8 text of the file
    pub raw_text: String,

    /// Display title from the attribution map, or the bare filename
    pub source_title: String,

    /// Canonical URL from the attribution map, when the file is known
    pub source_url: Option<String>,
}

/// A bounded-length slice of a document used as a retrieval unit.
///
/// Holds a back-reference to its source file (relation only, no
/// ownership of the document). Text is always non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text content
    pub text: String,

    /// Path of the originating document
    pub source_path: PathBuf,

    /// Position within the document (0-indexed, document order)
    pub position: u32,
}

/// Statistics from building a knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildStats {
    /// Number of guideline documents loaded
    pub documents_count: u32,

    /// Number of chunks indexed
    pub chunks_count: u32,

    /// Total bytes of source text processed
    pub bytes_processed: u64,

    /// Build duration in seconds
    pub duration_secs: f64,
}
