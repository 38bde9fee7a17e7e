use std::sync::Mutex;

use super::Log;

/// Forwards messages to `tracing`. Subprocess output arrives through
/// [`LogWriter`](super::LogWriter) and is tagged with the `jdeps` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl Log for TracingLog {
    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "jdeps", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "jdeps", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Wraps another sink and keeps a copy of every info line.
///
/// The generator itself never logs at info level, so what accumulates here is
/// exactly the stdout of the analysis run.
pub struct StdoutCapture<L> {
    inner: L,
    lines: Mutex<Vec<String>>,
}

impl<L: Log> StdoutCapture<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            lines: Mutex::new(Vec::new()),
        }
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<L: Log> Log for StdoutCapture<L> {
    fn debug(&self, message: &str) {
        self.inner.debug(message);
    }

    fn info(&self, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
        self.inner.info(message);
    }

    fn warn(&self, message: &str) {
        self.inner.warn(message);
    }

    fn error(&self, message: &str) {
        self.inner.error(message);
    }
}
