//! Batch assessment of FNOL documents in a directory.
//!
//! Each document is read, turned into a claim record, assessed, and the
//! assessment written next to the other results as `<stem>_Result.json`.
//! A failure on one document is logged and counted; the batch carries on.

pub mod report;

pub use report::{BatchReport, DocumentOutcome, DocumentStatus};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::domain::{Assessment, ClaimRecord};
use crate::intake::{FieldExtractor, FileTextSource, IntakeError, JsonFieldExtractor, TextSource};
use crate::observability::{MetricsRegistry, TimingGuard};
use crate::rules::RuleSet;

/// Suffix appended to a document's stem to name its result file.
pub const RESULT_SUFFIX: &str = "_Result";

/// Errors that abort a batch or a single document write.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize assessment: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Batch worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl BatchError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        BatchError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Where to read documents from and where to write results.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Accepted file extensions, lowercase without the dot
    pub extensions: Vec<String>,
    /// Maximum documents in flight
    pub concurrency: usize,
}

impl BatchOptions {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        BatchOptions {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            extensions: vec!["txt".to_string(), "json".to_string()],
            concurrency: 4,
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Returns true if `path` looks like an input document.
    ///
    /// Result files are never treated as inputs, so a run whose output
    /// directory is its input directory does not reprocess its own output.
    pub fn accepts(&self, path: &Path) -> bool {
        let is_result = path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| s.ends_with(RESULT_SUFFIX));

        let extension_ok = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(e)));

        extension_ok && !is_result
    }
}

/// Per-document work shared by all batch tasks.
#[derive(Clone)]
struct Pipeline {
    source: Arc<dyn TextSource>,
    extractor: Arc<dyn FieldExtractor>,
    ruleset: Arc<RuleSet>,
    metrics: Arc<MetricsRegistry>,
    output_dir: PathBuf,
}

impl Pipeline {
    async fn process(&self, path: PathBuf) -> DocumentOutcome {
        let document = display_name(&path);
        info!(document = %document, "Processing document");

        let text = match self.source.read_text(&path).await {
            Ok(text) => text,
            Err(IntakeError::EmptyDocument(_)) => {
                warn!(document = %document, "Document has no text, skipping");
                self.metrics.record_document_skipped();
                return DocumentOutcome::skipped(path);
            }
            Err(e) => {
                error!(document = %document, error = %e, "Failed to read document");
                self.metrics.record_document_failed();
                return DocumentOutcome::failed(path, e.to_string());
            }
        };

        let claim = match self.extractor.extract_fields(&text).await {
            Ok(claim) => claim,
            Err(e) => {
                warn!(
                    document = %document,
                    error = %e,
                    "Field extraction failed, continuing with empty claim record"
                );
                ClaimRecord::default()
            }
        };

        let evaluation = {
            let _timer = TimingGuard::new(&self.metrics);
            self.ruleset.evaluate(&claim)
        };
        self.metrics.record_evaluation(&evaluation);

        info!(
            document = %document,
            route = %evaluation.route(),
            rule_id = %evaluation.rule_id,
            missing_fields = evaluation.assessment.missing_fields.len(),
            "Claim assessed"
        );

        match self.write_result(&path, &evaluation.assessment).await {
            Ok(output) => {
                info!(document = %document, output = %output.display(), "Assessment saved");
                self.metrics.record_document_processed();
                DocumentOutcome::assessed(path, evaluation.route(), output)
            }
            Err(e) => {
                error!(document = %document, error = %e, "Failed to save assessment");
                self.metrics.record_document_failed();
                DocumentOutcome::failed(path, e.to_string())
            }
        }
    }

    async fn write_result(&self, document: &Path, assessment: &Assessment) -> Result<PathBuf, BatchError> {
        let output = result_path(&self.output_dir, document);
        let json = serde_json::to_string_pretty(assessment)?;

        tokio::fs::write(&output, json)
            .await
            .map_err(|e| BatchError::io(&output, e))?;

        Ok(output)
    }
}

/// Result file location for a document, e.g. `out/claim_01_Result.json`.
pub fn result_path(output_dir: &Path, document: &Path) -> PathBuf {
    let stem = document
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    output_dir.join(format!("{stem}{RESULT_SUFFIX}.json"))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Runs the assessment pipeline over every document in a directory.
pub struct BatchRunner {
    options: BatchOptions,
    pipeline: Pipeline,
}

impl BatchRunner {
    /// Create a runner reading text files and treating their content as
    /// extractor output.
    pub fn new(options: BatchOptions, ruleset: Arc<RuleSet>) -> Self {
        let output_dir = options.output_dir.clone();

        BatchRunner {
            options,
            pipeline: Pipeline {
                source: Arc::new(FileTextSource),
                extractor: Arc::new(JsonFieldExtractor),
                ruleset,
                metrics: Arc::new(MetricsRegistry::new()),
                output_dir,
            },
        }
    }

    pub fn with_text_source(mut self, source: Arc<dyn TextSource>) -> Self {
        self.pipeline.source = source;
        self
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn FieldExtractor>) -> Self {
        self.pipeline.extractor = extractor;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
        self.pipeline.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.pipeline.metrics
    }

    /// List input documents, creating the input directory if needed.
    ///
    /// Returned paths are sorted so runs are reproducible.
    pub async fn discover(&self) -> Result<Vec<PathBuf>, BatchError> {
        let input_dir = &self.options.input_dir;

        tokio::fs::create_dir_all(input_dir)
            .await
            .map_err(|e| BatchError::io(input_dir, e))?;

        let mut entries = tokio::fs::read_dir(input_dir)
            .await
            .map_err(|e| BatchError::io(input_dir, e))?;

        let mut documents = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| BatchError::io(input_dir, e))?
        {
            let path = entry.path();
            let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);

            if is_file && self.options.accepts(&path) {
                documents.push(path);
            }
        }

        documents.sort();
        Ok(documents)
    }

    /// Process every document and return the batch summary.
    pub async fn run(&self) -> Result<BatchReport, BatchError> {
        let output_dir = &self.options.output_dir;
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|e| BatchError::io(output_dir, e))?;

        let documents = self.discover().await?;
        let mut report = BatchReport::default();

        if documents.is_empty() {
            info!(
                input_dir = %self.options.input_dir.display(),
                extensions = ?self.options.extensions,
                "No documents found to process"
            );
            return Ok(report);
        }

        info!(
            count = documents.len(),
            ruleset = %self.pipeline.ruleset.policy_version,
            "Found documents to process"
        );

        let permits = Arc::new(Semaphore::new(self.options.concurrency.max(1)));
        let mut tasks = JoinSet::new();

        for path in documents {
            let pipeline = self.pipeline.clone();
            let permits = Arc::clone(&permits);

            tasks.spawn(async move {
                // The semaphore is never closed, so acquiring cannot fail
                let _permit = permits.acquire_owned().await.ok();
                pipeline.process(path).await
            });
        }

        while let Some(joined) = tasks.join_next().await {
            report.record(joined?);
        }

        info!(
            processed = report.processed,
            skipped = report.skipped,
            failed = report.failed,
            awaiting_handler = report.awaiting_handler(),
            routes = ?report.routes,
            "Batch processing complete"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Route;
    use async_trait::async_trait;
    use std::sync::atomic::Ordering;
    use tempfile::TempDir;

    const FAST_TRACK_CLAIM: &str = r#"{
        "policyDetails": {"policyNumber": "P-100", "policyHolderName": "Dana Scully"},
        "incidentDetails": {"date": "2025-02-11", "description": "Minor bumper damage."},
        "assetDetails": {"estimatedDamage": 1800},
        "mandatoryData": {"claimType": "Property Damage"}
    }"#;

    const INJURY_CLAIM: &str = r#"```json
{
  "policyDetails": {"policyNumber": "P-200", "policyHolderName": "Fox Mulder"},
  "incidentDetails": {"date": "2025-02-12", "description": "Passenger hurt in collision."},
  "assetDetails": {"estimatedDamage": 40000},
  "mandatoryData": {"claimType": "Bodily Injury"}
}
```"#;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn runner(input: &TempDir, output: &TempDir) -> BatchRunner {
        let options = BatchOptions::new(input.path(), output.path()).with_concurrency(2);
        BatchRunner::new(options, Arc::new(RuleSet::standard()))
    }

    #[test]
    fn test_options_accepts() {
        let options = BatchOptions::new("in", "out").with_extensions([".TXT", "json", " "]);

        assert_eq!(options.extensions, vec!["txt", "json"]);
        assert!(options.accepts(Path::new("in/claim.txt")));
        assert!(options.accepts(Path::new("in/claim.JSON")));
        assert!(!options.accepts(Path::new("in/claim.pdf")));
        assert!(!options.accepts(Path::new("in/README")));
        assert!(!options.accepts(Path::new("in/claim_Result.json")));
    }

    #[test]
    fn test_result_path() {
        assert_eq!(
            result_path(Path::new("out"), Path::new("in/acord_01.txt")),
            PathBuf::from("out/acord_01_Result.json")
        );
    }

    #[tokio::test]
    async fn test_run_batch() {
        crate::observability::tracing::init_test_tracing();

        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write(input.path(), "a_fast.json", FAST_TRACK_CLAIM);
        write(input.path(), "b_injury.txt", INJURY_CLAIM);
        write(input.path(), "c_blank.txt", "  \n");
        write(input.path(), "d_garbage.txt", "The adjuster could not read this form.");
        write(input.path(), "e_ignored.md", FAST_TRACK_CLAIM);

        let runner = runner(&input, &output);
        let report = runner.run().await.unwrap();

        assert_eq!(report.processed, 3);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 0);
        assert_eq!(report.route_count(Route::FastTrack), 1);
        assert_eq!(report.route_count(Route::SpecialistQueue), 1);
        assert_eq!(report.route_count(Route::ManualReview), 1);
        assert_eq!(report.awaiting_handler(), 2);

        let saved = std::fs::read_to_string(output.path().join("a_fast_Result.json")).unwrap();
        let assessment: Assessment = serde_json::from_str(&saved).unwrap();
        assert_eq!(assessment.recommended_route, Route::FastTrack);
        assert_eq!(
            assessment.extracted_fields.policy.policy_number.as_deref(),
            Some("P-100")
        );

        let saved = std::fs::read_to_string(output.path().join("d_garbage_Result.json")).unwrap();
        let assessment: Assessment = serde_json::from_str(&saved).unwrap();
        assert_eq!(assessment.missing_fields.len(), 4);

        assert!(!output.path().join("c_blank_Result.json").exists());
        assert!(!output.path().join("e_ignored_Result.json").exists());

        let metrics = runner.metrics();
        assert_eq!(metrics.documents_processed_total.load(Ordering::Relaxed), 3);
        assert_eq!(metrics.documents_skipped_total.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.assessments_total.load(Ordering::Relaxed), 3);
    }

    #[tokio::test]
    async fn test_empty_input_directory() {
        let root = TempDir::new().unwrap();
        let input = root.path().join("InputDocs");
        let output = root.path().join("Output");

        let runner = BatchRunner::new(
            BatchOptions::new(&input, &output),
            Arc::new(RuleSet::standard()),
        );
        let report = runner.run().await.unwrap();

        assert_eq!(report.total(), 0);
        assert!(input.is_dir());
        assert!(output.is_dir());
    }

    #[tokio::test]
    async fn test_rerun_in_same_directory_ignores_results() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "claim.json", FAST_TRACK_CLAIM);

        let runner = BatchRunner::new(
            BatchOptions::new(dir.path(), dir.path()),
            Arc::new(RuleSet::standard()),
        );

        let first = runner.run().await.unwrap();
        let second = runner.run().await.unwrap();

        assert_eq!(first.processed, 1);
        assert_eq!(second.processed, 1);
        assert!(dir.path().join("claim_Result.json").exists());
        assert!(!dir.path().join("claim_Result_Result.json").exists());
    }

    #[derive(Debug)]
    struct FailingExtractor;

    #[async_trait]
    impl FieldExtractor for FailingExtractor {
        async fn extract_fields(&self, _text: &str) -> Result<ClaimRecord, IntakeError> {
            Err(IntakeError::Extraction("inference service unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_extractor_failure_uses_empty_record() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write(input.path(), "claim.json", FAST_TRACK_CLAIM);

        let runner = runner(&input, &output).with_extractor(Arc::new(FailingExtractor));
        let report = runner.run().await.unwrap();

        assert_eq!(report.processed, 1);
        assert_eq!(report.route_count(Route::ManualReview), 1);

        let saved = std::fs::read_to_string(output.path().join("claim_Result.json")).unwrap();
        let assessment: Assessment = serde_json::from_str(&saved).unwrap();
        assert_eq!(assessment.extracted_fields, ClaimRecord::default());
    }

    #[derive(Debug)]
    struct FlakySource;

    #[async_trait]
    impl TextSource for FlakySource {
        async fn read_text(&self, path: &Path) -> Result<String, IntakeError> {
            if path.to_string_lossy().contains("locked") {
                return Err(IntakeError::Io {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked"),
                });
            }
            FileTextSource.read_text(path).await
        }
    }

    #[tokio::test]
    async fn test_read_failure_does_not_stop_batch() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write(input.path(), "locked.json", FAST_TRACK_CLAIM);
        write(input.path(), "open.json", FAST_TRACK_CLAIM);

        let runner = runner(&input, &output).with_text_source(Arc::new(FlakySource));
        let report = runner.run().await.unwrap();

        assert_eq!(report.processed, 1);
        assert_eq!(report.failed, 1);
        assert!(matches!(
            report.documents[0].status,
            DocumentStatus::Failed { .. }
        ));
        assert!(output.path().join("open_Result.json").exists());
    }

    #[tokio::test]
    async fn test_unusable_output_directory() {
        let input = TempDir::new().unwrap();
        let blocker = write(input.path(), "not_a_dir", "");

        let runner = BatchRunner::new(
            BatchOptions::new(input.path(), blocker.join("out")),
            Arc::new(RuleSet::standard()),
        );

        let err = runner.run().await.unwrap_err();
        assert!(matches!(err, BatchError::Io { .. }));
    }
}
