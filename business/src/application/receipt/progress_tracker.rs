use std::sync::Arc;

use crate::domain::receipt::progress::ProgressStage;
use crate::domain::receipt::services::ProgressReporter;

/// Per-run progress state in front of a [`ProgressReporter`].
///
/// Reported percentages never decrease within a run. The tracker reports
/// `0` when created and again when the run ends, including when the owning
/// future is dropped mid-flight.
pub struct ProgressTracker {
    reporter: Arc<dyn ProgressReporter>,
    current: ProgressStage,
}

impl ProgressTracker {
    pub fn start(reporter: Arc<dyn ProgressReporter>) -> Self {
        reporter.report(ProgressStage::Idle);
        Self {
            reporter,
            current: ProgressStage::Idle,
        }
    }

    /// Reports `stage` unless it would move progress backwards.
    pub fn advance(&mut self, stage: ProgressStage) {
        if stage < self.current {
            return;
        }
        self.current = stage;
        self.reporter.report(stage);
    }

    pub fn reset(&mut self) {
        self.current = ProgressStage::Idle;
        self.reporter.report(ProgressStage::Idle);
    }

    pub fn percent(&self) -> u8 {
        self.current.percent()
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        if self.current != ProgressStage::Idle {
            self.reset();
        }
    }
}
