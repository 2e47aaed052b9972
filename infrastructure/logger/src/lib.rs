mod tracing_logger;
mod tracing_progress;

pub use tracing_logger::TracingLogger;
pub use tracing_progress::TracingProgressReporter;
