//! Logging for module-list runs.
//!
//! - [`Log`] is the sink a run reports through; the caller owns it.
//! - [`LogWriter`] adapts a sink into an [`std::io::Write`] so subprocess
//!   output lands in the log line by line.
//! - [`sink`] holds the `tracing`-backed sink and the stdout capture used by
//!   the CLI, [`subscriber`] sets up `tracing-subscriber`.

use std::io::Write;

use tracing::Level;

pub mod sink;
pub mod subscriber;

/// Leveled log sink.
pub trait Log: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);

    fn log(&self, level: Level, message: &str) {
        match level {
            Level::ERROR => self.error(message),
            Level::WARN => self.warn(message),
            Level::INFO => self.info(message),
            _ => self.debug(message),
        }
    }
}

/// Line-buffering writer that forwards every complete line to a [`Log`].
///
/// A trailing `\r` is stripped and blank lines are dropped. Whatever is left
/// without a newline is emitted on [`flush`](Write::flush) or drop.
pub struct LogWriter<'a> {
    log: &'a dyn Log,
    level: Level,
    pending: Vec<u8>,
}

impl<'a> LogWriter<'a> {
    pub fn new(log: &'a dyn Log, level: Level) -> Self {
        Self {
            log,
            level,
            pending: Vec::new(),
        }
    }

    fn emit(&self, raw: &[u8]) {
        let line = String::from_utf8_lossy(raw);
        let line = line.trim_end_matches('\r');
        if !line.trim().is_empty() {
            self.log.log(self.level, line);
        }
    }
}

impl Write for LogWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.emit(&line[..line.len() - 1]);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.emit(&rest);
        }
        Ok(())
    }
}

impl Drop for LogWriter<'_> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use tracing::Level;

    use super::Log;

    /// Sink that keeps every message for later assertions.
    #[derive(Default)]
    pub struct RecordingLog {
        entries: Mutex<Vec<(Level, String)>>,
    }

    impl RecordingLog {
        pub fn entries(&self) -> Vec<(Level, String)> {
            self.entries.lock().unwrap().clone()
        }

        pub fn messages(&self, level: Level) -> Vec<String> {
            self.entries()
                .into_iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, m)| m)
                .collect()
        }

        fn push(&self, level: Level, message: &str) {
            self.entries.lock().unwrap().push((level, message.to_string()));
        }
    }

    impl Log for RecordingLog {
        fn debug(&self, message: &str) {
            self.push(Level::DEBUG, message);
        }

        fn info(&self, message: &str) {
            self.push(Level::INFO, message);
        }

        fn warn(&self, message: &str) {
            self.push(Level::WARN, message);
        }

        fn error(&self, message: &str) {
            self.push(Level::ERROR, message);
        }
    }
}
