//! Progress reporting for batch resolution.

use log::info;

use super::ResolutionOutcome;

/// Trait for reporting resolution progress.
pub trait ResolutionProgressReporter: Send + Sync {
    /// Report that a run over `total` names is starting.
    fn report_start(&self, total: usize);

    /// Report the name about to be resolved; `position` is 1-based over all
    /// names, skipped ones included.
    fn report_progress(&self, position: usize, total: usize, company_name: &str);

    /// Report that the run finished.
    fn report_complete(&self, outcome: &ResolutionOutcome);
}

/// Reporter that writes `(i/total)` progress lines to the log.
#[derive(Debug, Clone, Default)]
pub struct LogProgressReporter;

impl ResolutionProgressReporter for LogProgressReporter {
    fn report_start(&self, total: usize) {
        info!("Resolving tickers for {} companies", total);
    }

    fn report_progress(&self, position: usize, total: usize, company_name: &str) {
        info!("Processing {} ({}/{})", company_name, position, total);
    }

    fn report_complete(&self, outcome: &ResolutionOutcome) {
        info!(
            "Resolution finished: {} attempted, {} resolved, {} unresolved, {} failed, {} skipped",
            outcome.attempted, outcome.resolved, outcome.unresolved, outcome.failed, outcome.skipped
        );
    }
}

/// A no-op progress reporter for contexts where progress reporting is not needed.
#[derive(Debug, Clone, Default)]
pub struct NoOpProgressReporter;

impl ResolutionProgressReporter for NoOpProgressReporter {
    fn report_start(&self, _total: usize) {
        // No-op
    }

    fn report_progress(&self, _position: usize, _total: usize, _company_name: &str) {
        // No-op
    }

    fn report_complete(&self, _outcome: &ResolutionOutcome) {
        // No-op
    }
}
