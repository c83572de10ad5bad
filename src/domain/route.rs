use serde::{Deserialize, Serialize};
use std::fmt;

/// Downstream handling queue for an assessed claim.
///
/// The serialized form is the human-facing label, which is also what
/// claim handlers see in result files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Route {
    /// Low value, complete claim; straight-through processing
    #[serde(rename = "Fast-track")]
    FastTrack,
    /// Adjuster review, either for missing data or standard handling
    #[serde(rename = "Manual review")]
    ManualReview,
    /// Personal injury exposure
    #[serde(rename = "Specialist Queue")]
    SpecialistQueue,
    /// Potential fraud
    #[serde(rename = "Investigation Flag")]
    InvestigationFlag,
}

impl Route {
    /// Every route, in declaration order.
    pub const ALL: [Route; 4] = [
        Route::FastTrack,
        Route::ManualReview,
        Route::SpecialistQueue,
        Route::InvestigationFlag,
    ];

    /// Human-readable label used on the wire.
    pub fn label(&self) -> &'static str {
        match self {
            Route::FastTrack => "Fast-track",
            Route::ManualReview => "Manual review",
            Route::SpecialistQueue => "Specialist Queue",
            Route::InvestigationFlag => "Investigation Flag",
        }
    }

    /// Short identifier suitable for metric labels.
    pub fn metric_key(&self) -> &'static str {
        match self {
            Route::FastTrack => "fast_track",
            Route::ManualReview => "manual_review",
            Route::SpecialistQueue => "specialist_queue",
            Route::InvestigationFlag => "investigation_flag",
        }
    }

    /// Returns true if a human must look at the claim before payment.
    #[inline]
    pub fn requires_handler(&self) -> bool {
        !matches!(self, Route::FastTrack)
    }
}

impl Default for Route {
    fn default() -> Self {
        Route::ManualReview
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
