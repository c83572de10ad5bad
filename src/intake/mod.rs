//! Collaborator seams in front of the assessment engine.
//!
//! A [`TextSource`] turns a stored document into text, and a
//! [`FieldExtractor`] turns that text into a [`ClaimRecord`]. Both are
//! traits so that document parsers and inference clients can be plugged
//! in without touching the engine.

pub mod fs;
pub mod response;

pub use fs::{FileTextSource, JsonFieldExtractor};
pub use response::{parse_extractor_output, strip_code_fences};

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::ClaimRecord;

/// Errors raised by intake collaborators.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Document has no text: {}", .0.display())]
    EmptyDocument(PathBuf),

    #[error("Field extraction failed: {0}")]
    Extraction(String),
}

/// Reads the text content of a stored document.
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Read the document at `path`.
    ///
    /// Returns [`IntakeError::EmptyDocument`] when the document holds no
    /// non-whitespace text.
    async fn read_text(&self, path: &Path) -> Result<String, IntakeError>;
}

/// Derives a structured claim from document text.
#[async_trait]
pub trait FieldExtractor: Send + Sync {
    /// Extract claim fields from `text`.
    ///
    /// Implementations return whatever they could find; callers treat an
    /// error as "nothing found" and continue with the empty record.
    async fn extract_fields(&self, text: &str) -> Result<ClaimRecord, IntakeError>;
}
