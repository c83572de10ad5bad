use async_trait::async_trait;
use std::path::Path;

use super::{parse_extractor_output, FieldExtractor, IntakeError, TextSource};
use crate::domain::ClaimRecord;

/// Reads UTF-8 text documents from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FileTextSource;

#[async_trait]
impl TextSource for FileTextSource {
    async fn read_text(&self, path: &Path) -> Result<String, IntakeError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| IntakeError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        if text.trim().is_empty() {
            return Err(IntakeError::EmptyDocument(path.to_path_buf()));
        }

        Ok(text)
    }
}

/// Field extractor for documents that already hold the extractor's JSON
/// answer, such as saved inference responses or pre-structured intake
/// forms.
#[derive(Debug, Clone, Default)]
pub struct JsonFieldExtractor;

#[async_trait]
impl FieldExtractor for JsonFieldExtractor {
    async fn extract_fields(&self, text: &str) -> Result<ClaimRecord, IntakeError> {
        Ok(parse_extractor_output(text))
    }
}
