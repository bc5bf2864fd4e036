//! Diagnostic sinks
//!
//! [`dump`](crate::dump) writes its rendering to every registered listener.
//! The list is process-wide and starts with a [`LogSink`], so dumps show up
//! wherever the application's `log` output goes. Listeners can be added and
//! removed at any time; concurrent dumps may interleave their output.

use super::formats::LINE_ENDING;
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Log target used by [`LogSink`].
pub const LOG_TARGET: &str = "graph_dump";

/// Receives rendered dumps.
pub trait DiagnosticSink: Send + Sync {
    /// Write text as-is. A dump arrives as one call, line terminators included.
    fn write(&self, text: &str);

    fn write_line(&self, line: &str) {
        self.write(line);
        self.write(LINE_ENDING);
    }
}

/// Forwards each dumped line to the `log` facade.
#[derive(Debug, Clone)]
pub struct LogSink {
    level: log::Level,
}

impl LogSink {
    pub fn new(level: log::Level) -> Self {
        LogSink { level }
    }

    pub fn level(&self) -> log::Level {
        self.level
    }
}

impl Default for LogSink {
    fn default() -> Self {
        LogSink::new(log::Level::Debug)
    }
}

impl DiagnosticSink for LogSink {
    fn write(&self, text: &str) {
        for line in text.lines() {
            log::log!(target: LOG_TARGET, self.level, "{line}");
        }
    }

    fn write_line(&self, line: &str) {
        log::log!(target: LOG_TARGET, self.level, "{line}");
    }
}

/// Collects everything written to it. Mostly useful in tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    buffer: Mutex<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Return the collected text and start over.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.buffer.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl DiagnosticSink for MemorySink {
    fn write(&self, text: &str) {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_str(text);
    }
}

type Listeners = RwLock<Vec<Arc<dyn DiagnosticSink>>>;

static LISTENERS: Lazy<Listeners> = Lazy::new(|| {
    let default: Arc<dyn DiagnosticSink> = Arc::new(LogSink::default());
    RwLock::new(vec![default])
});

pub fn add_listener(sink: Arc<dyn DiagnosticSink>) {
    LISTENERS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .push(sink);
}

/// Remove every registration of `sink`. Returns whether anything was removed.
pub fn remove_listener<S: DiagnosticSink + ?Sized>(sink: &Arc<S>) -> bool {
    let target = Arc::as_ptr(sink).cast::<()>();
    let mut listeners = LISTENERS.write().unwrap_or_else(PoisonError::into_inner);
    let before = listeners.len();
    listeners.retain(|listener| Arc::as_ptr(listener).cast::<()>() != target);
    listeners.len() != before
}

/// Remove all listeners, the default [`LogSink`] included.
pub fn clear_listeners() {
    LISTENERS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .clear();
}

pub fn listener_count() -> usize {
    LISTENERS.read().unwrap_or_else(PoisonError::into_inner).len()
}

/// Write `text` to every listener.
pub(crate) fn emit(text: &str) {
    let listeners = LISTENERS.read().unwrap_or_else(PoisonError::into_inner);
    for listener in listeners.iter() {
        listener.write(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_collects_and_takes() {
        let sink = MemorySink::new();
        sink.write("a");
        sink.write_line("b");
        assert_eq!(sink.contents(), format!("ab{LINE_ENDING}"));
        assert_eq!(sink.take(), format!("ab{LINE_ENDING}"));
        assert_eq!(sink.contents(), "");
    }

    #[test]
    fn listeners_receive_emitted_text_until_removed() {
        let sink = Arc::new(MemorySink::new());
        add_listener(sink.clone());
        emit("listener-check-7f3a\n");
        assert!(sink.contents().contains("listener-check-7f3a"));

        assert!(remove_listener(&sink));
        assert!(!remove_listener(&sink));
        emit("listener-check-after\n");
        assert!(!sink.contents().contains("listener-check-after"));
    }

    #[test]
    fn log_sink_defaults_to_debug() {
        assert_eq!(LogSink::default().level(), log::Level::Debug);
    }
}
