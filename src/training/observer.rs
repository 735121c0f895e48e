//! Training progress reporting.
//!
//! The trainer never prints. It hands a [`RoundReport`] to an injected
//! [`TrainingObserver`] after every boosting round.

/// How much the [`LoggingObserver`] reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Nothing.
    #[default]
    Silent,
    /// Warnings only, such as a diverging training error.
    Warning,
    /// Periodic round reports and the final summary.
    Info,
    /// Every round.
    Debug,
}

impl Verbosity {
    /// Whether the start and end of training are logged.
    #[inline]
    pub fn reports_summary(self) -> bool {
        self >= Verbosity::Info
    }

    /// Whether problems with a round are logged.
    #[inline]
    pub fn reports_warnings(self) -> bool {
        self >= Verbosity::Warning
    }
}

/// Progress after one boosting round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundReport {
    /// Zero-based round index.
    pub round: u32,
    /// Total rounds configured.
    pub n_rounds: u32,
    /// Training RMSE after this round.
    pub train_rmse: f64,
    /// Leaves in the tree grown this round.
    pub n_leaves: usize,
}

impl RoundReport {
    #[inline]
    pub fn is_last(&self) -> bool {
        self.round + 1 >= self.n_rounds
    }
}

/// Receives training progress.
pub trait TrainingObserver {
    /// Called once before the first round.
    fn on_start(&mut self, _n_rows: usize, _n_rounds: u32) {}

    /// Called after every round.
    fn on_round(&mut self, report: &RoundReport);
}

/// Ignores every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TrainingObserver for NoopObserver {
    fn on_round(&mut self, _report: &RoundReport) {}
}

/// Forwards reports to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver {
    verbosity: Verbosity,
}

impl LoggingObserver {
    /// Info-level round reports are emitted every this many rounds.
    const INFO_PERIOD: u32 = 10;

    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

impl TrainingObserver for LoggingObserver {
    fn on_start(&mut self, n_rows: usize, n_rounds: u32) {
        if self.verbosity.reports_summary() {
            tracing::info!(rows = n_rows, rounds = n_rounds, "training started");
        }
    }

    fn on_round(&mut self, report: &RoundReport) {
        let periodic = report.round % Self::INFO_PERIOD == 0;
        match self.verbosity {
            Verbosity::Silent => {}
            Verbosity::Debug => tracing::debug!(
                round = report.round,
                rmse = report.train_rmse,
                leaves = report.n_leaves,
                "boosting round"
            ),
            Verbosity::Info if periodic || report.is_last() => tracing::info!(
                round = report.round,
                rmse = report.train_rmse,
                "boosting round"
            ),
            Verbosity::Warning | Verbosity::Info => {}
        }
        if !report.train_rmse.is_finite() && self.verbosity.reports_warnings() {
            tracing::warn!(round = report.round, rmse = report.train_rmse, "training error is not finite");
        }
        if report.is_last() && self.verbosity.reports_summary() {
            tracing::info!(rounds = report.n_rounds, rmse = report.train_rmse, "training finished");
        }
    }
}

/// Collects every report; handy in tests and notebooks.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub reports: Vec<RoundReport>,
}

impl TrainingObserver for RecordingObserver {
    fn on_round(&mut self, report: &RoundReport) {
        self.reports.push(*report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_is_ordered() {
        assert!(Verbosity::Silent < Verbosity::Warning);
        assert!(Verbosity::Info < Verbosity::Debug);
        assert_eq!(Verbosity::default(), Verbosity::Silent);
    }

    #[test]
    fn summary_is_logged_from_info_up() {
        assert!(!Verbosity::Silent.reports_summary());
        assert!(!Verbosity::Warning.reports_summary());
        assert!(Verbosity::Info.reports_summary());
        assert!(Verbosity::Debug.reports_summary());

        assert!(!Verbosity::Silent.reports_warnings());
        assert!(Verbosity::Warning.reports_warnings());
    }

    #[test]
    fn recording_observer_keeps_reports() {
        let mut observer = RecordingObserver::default();
        for round in 0..3 {
            observer.on_round(&RoundReport {
                round,
                n_rounds: 3,
                train_rmse: 1.0 / (round + 1) as f64,
                n_leaves: 2,
            });
        }
        assert_eq!(observer.reports.len(), 3);
        assert!(observer.reports[2].is_last());
    }

    #[test]
    fn logging_observer_without_subscriber_is_harmless() {
        let mut observer = LoggingObserver::new(Verbosity::Debug);
        observer.on_start(2, 1);
        observer.on_round(&RoundReport {
            round: 0,
            n_rounds: 1,
            train_rmse: 0.5,
            n_leaves: 2,
        });
    }
}
