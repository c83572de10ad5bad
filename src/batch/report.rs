use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::Route;

/// What happened to one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    /// Assessed and written to `output`
    Assessed { route: Route, output: PathBuf },
    /// No text to assess
    Skipped,
    /// Read or write failure
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOutcome {
    pub document: PathBuf,
    pub status: DocumentStatus,
}

impl DocumentOutcome {
    pub fn assessed(document: PathBuf, route: Route, output: PathBuf) -> Self {
        DocumentOutcome {
            document,
            status: DocumentStatus::Assessed { route, output },
        }
    }

    pub fn skipped(document: PathBuf) -> Self {
        DocumentOutcome {
            document,
            status: DocumentStatus::Skipped,
        }
    }

    pub fn failed(document: PathBuf, error: impl Into<String>) -> Self {
        DocumentOutcome {
            document,
            status: DocumentStatus::Failed {
                error: error.into(),
            },
        }
    }
}

/// Summary of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Processed documents per recommended route
    pub routes: BTreeMap<Route, usize>,
    /// Per-document outcomes, ordered by document path
    pub documents: Vec<DocumentOutcome>,
}

impl BatchReport {
    /// Fold one document outcome into the report.
    pub fn record(&mut self, outcome: DocumentOutcome) {
        match &outcome.status {
            DocumentStatus::Assessed { route, .. } => {
                self.processed += 1;
                *self.routes.entry(*route).or_insert(0) += 1;
            }
            DocumentStatus::Skipped => self.skipped += 1,
            DocumentStatus::Failed { .. } => self.failed += 1,
        }

        let idx = self
            .documents
            .partition_point(|d| d.document < outcome.document);
        self.documents.insert(idx, outcome);
    }

    /// Total documents seen.
    pub fn total(&self) -> usize {
        self.processed + self.skipped + self.failed
    }

    /// Processed documents routed to a queue that needs a claim handler.
    pub fn awaiting_handler(&self) -> usize {
        self.routes
            .iter()
            .filter(|(route, _)| route.requires_handler())
            .map(|(_, count)| count)
            .sum()
    }

    /// Processed documents that were given `route`.
    pub fn route_count(&self, route: Route) -> usize {
        self.routes.get(&route).copied().unwrap_or(0)
    }
}
