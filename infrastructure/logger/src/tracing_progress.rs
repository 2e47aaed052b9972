use business::domain::receipt::progress::ProgressStage;
use business::domain::receipt::services::ProgressReporter;
use tracing::debug;

/// Emits each extraction milestone as a structured trace event.
pub struct TracingProgressReporter;

impl ProgressReporter for TracingProgressReporter {
    fn report(&self, stage: ProgressStage) {
        debug!(
            target: "receipt_extraction::progress",
            stage = %stage,
            percent = stage.percent(),
            "extraction progress"
        );
    }
}
