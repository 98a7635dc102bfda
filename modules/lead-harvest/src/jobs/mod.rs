//! Harvest jobs: each runs one actor, walks its dataset and writes CSV rows.

pub mod comments;
pub mod engagers;
pub mod posts;
pub mod profiles;

pub use comments::harvest_comments;
pub use engagers::harvest_engagers;
pub use posts::harvest_posts;
pub use profiles::harvest_profiles;

use std::path::Path;

/// Item counts for one job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HarvestSummary {
    /// Dataset items read.
    pub seen: usize,
    /// Rows written to the output file.
    pub written: usize,
    /// Items dropped by the job's filter.
    pub skipped: usize,
}

impl HarvestSummary {
    pub(crate) fn log(&self, job: &str, output: &Path) {
        tracing::info!(
            job,
            seen = self.seen,
            written = self.written,
            skipped = self.skipped,
            output = %output.display(),
            "Harvest finished"
        );
    }
}

/// Value or the `"N/A"` sentinel.
pub(crate) fn or_na(value: Option<String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| crate::company::NOT_AVAILABLE.to_string())
}
