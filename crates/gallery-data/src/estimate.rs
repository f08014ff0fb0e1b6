//! Match-count estimators for the approximate search.
//!
//! The search engine asks its estimator after every scanned batch whether the
//! scan may stop, and if so, what total match count to report. The default
//! [`DensityEstimator`] stops once a page is full and enough matches were seen,
//! then projects the observed match density over the whole dataset.
//! [`ExactCount`] never stops early and is meant for small datasets and tests.

use std::fmt;

/// Snapshot of a running scan, handed to the estimator after each batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanProgress {
    /// Matches counted so far
    pub matches: u64,
    /// Records scanned so far
    pub scanned: u64,
    /// Size of the whole dataset
    pub dataset_size: u64,
    /// Whether the requested page is complete
    pub page_full: bool,
}

/// Strategy deciding when a search scan may stop and what total to report
pub trait MatchEstimator: fmt::Debug + Send + Sync {
    /// Whether the scan can stop before reaching the end of the dataset
    fn should_stop(&self, progress: &ScanProgress) -> bool;

    /// Total match count to report for a scan cut short at `progress`
    fn estimate(&self, progress: &ScanProgress) -> u64;
}

/// Default heuristic: stop on a full page once `min_matches` have been counted,
/// then extrapolate `matches * dataset_size / scanned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DensityEstimator {
    /// Matches to count before an early stop is allowed
    pub min_matches: u64,
}

impl DensityEstimator {
    /// Minimum matches counted before a scan may stop early
    pub const DEFAULT_MIN_MATCHES: u64 = 1000;
}

impl Default for DensityEstimator {
    fn default() -> Self {
        Self {
            min_matches: Self::DEFAULT_MIN_MATCHES,
        }
    }
}

impl MatchEstimator for DensityEstimator {
    fn should_stop(&self, progress: &ScanProgress) -> bool {
        progress.page_full && progress.matches >= self.min_matches
    }

    fn estimate(&self, progress: &ScanProgress) -> u64 {
        if progress.scanned == 0 {
            return progress.matches;
        }

        let density = progress.matches as f64 / progress.scanned as f64;
        (density * progress.dataset_size as f64).round() as u64
    }
}

/// Scan everything and report the exact count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExactCount;

impl MatchEstimator for ExactCount {
    fn should_stop(&self, _progress: &ScanProgress) -> bool {
        false
    }

    fn estimate(&self, progress: &ScanProgress) -> u64 {
        progress.matches
    }
}
