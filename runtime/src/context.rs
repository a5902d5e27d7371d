//! Execution context shared by the dispatcher and command handlers.
//!
//! A [`ShellContext`] bundles the single output sink, the active render
//! mode, and a host-owned settings store. Handlers receive `&mut
//! ShellContext`, so anything a handler prints and anything the formatter
//! renders land on the same sink; capturing one captures the other.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::format::FormatMode;

/// Per-shell execution context.
///
/// Holds the output sink, the active [`FormatMode`], and an
/// insertion-ordered settings store for host state that must survive
/// across invocations (replacing any process-wide mutable state a command
/// might otherwise keep).
///
/// Access is strictly single-threaded: dispatch is sequential and nothing
/// here is synchronized. A host that invokes commands concurrently against
/// one context is outside the supported model.
pub struct ShellContext {
    sink: Box<dyn Write>,
    mode: FormatMode,
    settings: Map<String, Value>,
}

impl ShellContext {
    /// Creates a context writing to stdout, in auto render mode.
    pub fn new() -> Self {
        Self::with_sink(Box::new(io::stdout()))
    }

    /// Creates a context writing to the given sink.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdshell_runtime::{MemorySink, ShellContext};
    ///
    /// let sink = MemorySink::new();
    /// let mut context = ShellContext::with_sink(Box::new(sink.clone()));
    /// context.print("hello");
    /// assert_eq!(sink.contents(), "hello\n");
    /// ```
    pub fn with_sink(sink: Box<dyn Write>) -> Self {
        Self {
            sink,
            mode: FormatMode::default(),
            settings: Map::new(),
        }
    }

    /// Writes one line to the sink.
    ///
    /// Sink write failures are ignored; the sink is the only reporting
    /// channel there is.
    pub fn print(&mut self, line: &str) {
        let _ = writeln!(self.sink, "{line}");
    }

    /// The active render mode.
    pub fn mode(&self) -> FormatMode {
        self.mode
    }

    /// Sets the active render mode.
    pub fn set_mode(&mut self, mode: FormatMode) {
        self.mode = mode;
    }

    /// Read access to the host settings store.
    pub fn settings(&self) -> &Map<String, Value> {
        &self.settings
    }

    /// Write access to the host settings store.
    pub fn settings_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.settings
    }
}

impl Default for ShellContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ShellContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellContext")
            .field("mode", &self.mode)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Shared in-memory sink for hosts and tests that capture output.
///
/// Clones share one buffer. Not thread-safe, matching the shell's strictly
/// sequential execution model.
///
/// # Examples
///
/// ```
/// use std::io::Write;
///
/// use cmdshell_runtime::MemorySink;
///
/// let sink = MemorySink::new();
/// let mut writer = sink.clone();
/// writeln!(writer, "captured").unwrap();
/// assert_eq!(sink.contents(), "captured\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.borrow()).into_owned()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        self.buffer.borrow_mut().clear();
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_appends_newline() {
        let sink = MemorySink::new();
        let mut context = ShellContext::with_sink(Box::new(sink.clone()));
        context.print("one");
        context.print("two");
        assert_eq!(sink.contents(), "one\ntwo\n");
    }

    #[test]
    fn test_mode_round_trip() {
        let mut context = ShellContext::with_sink(Box::new(MemorySink::new()));
        assert_eq!(context.mode(), FormatMode::Auto);
        context.set_mode(FormatMode::Json);
        assert_eq!(context.mode(), FormatMode::Json);
    }

    #[test]
    fn test_settings_store_keeps_insertion_order() {
        let mut context = ShellContext::with_sink(Box::new(MemorySink::new()));
        context
            .settings_mut()
            .insert("theme".to_string(), Value::String("dark".to_string()));
        context
            .settings_mut()
            .insert("auto_save".to_string(), Value::String("true".to_string()));

        let keys: Vec<&String> = context.settings().keys().collect();
        assert_eq!(keys, vec!["theme", "auto_save"]);
    }

    #[test]
    fn test_memory_sink_clones_share_buffer() {
        let sink = MemorySink::new();
        let mut writer = sink.clone();
        writer.write_all(b"shared").unwrap();
        assert_eq!(sink.contents(), "shared");
        sink.clear();
        assert_eq!(sink.contents(), "");
    }
}
