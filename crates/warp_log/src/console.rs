//! The process-wide console sink.
//!
//! Every line written by the warp tools goes through a [`Console`]. A
//! console owns the stdout and stderr writers behind one mutex, so a line is
//! always written (and flushed) in a single locked section and output from
//! several threads never interleaves.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use once_cell::sync::Lazy;
use warp_style::{ColorMode, Stream, Style, env_allows_color};

use crate::level::Level;

/// Callback invoked when writing to the console fails.
///
/// Without a handler the console prints a single warning to the real
/// stderr and then drops failures silently.
pub type ErrorHandler = Arc<dyn Fn(io::Error) + Send + Sync>;

/// Initial capacity of the per-thread line buffer.
pub const DEFAULT_LINE_CAPACITY: usize = 256;

/// Separator written between prefix, level label and message.
pub const SEPARATOR: &str = " : ";

/// Horizontal rule used between report sections.
pub const BREAK_LINE: &str = "---\n";

thread_local! {
    static LINE_BUF: RefCell<String> = RefCell::new(String::with_capacity(DEFAULT_LINE_CAPACITY));
}

static GLOBAL: Lazy<Arc<Console>> = Lazy::new(|| Arc::new(Console::stdio()));

struct Writers {
    stdout: Box<dyn Write + Send>,
    stderr: Box<dyn Write + Send>,
    has_warned_io_failure: bool,
}

/// Locked output sink shared by every logger.
pub struct Console {
    writers: Mutex<Writers>,
    colors: AtomicBool,
    min_level: AtomicI32,
    error_handler: RwLock<Option<ErrorHandler>>,
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("colors", &self.colors())
            .field("min_level", &self.min_level())
            .finish()
    }
}

impl Console {
    /// A console over the process's stdout and stderr, colored when they are terminals.
    pub fn stdio() -> Self {
        let colors = ColorMode::Auto.resolve(Stream::Stdout) && ColorMode::Auto.resolve(Stream::Stderr);
        Self::with_writers(Box::new(io::stdout()), Box::new(io::stderr()), colors)
    }

    /// A console over arbitrary writers.
    pub fn with_writers(
        stdout: Box<dyn Write + Send>,
        stderr: Box<dyn Write + Send>,
        colors: bool,
    ) -> Self {
        Self {
            writers: Mutex::new(Writers {
                stdout,
                stderr,
                has_warned_io_failure: false,
            }),
            colors: AtomicBool::new(colors),
            min_level: AtomicI32::new(Level::Debug as i32),
            error_handler: RwLock::new(None),
        }
    }

    /// An in-memory console, uncolored, plus a handle to read what was written.
    pub fn capture() -> (Arc<Console>, Capture) {
        let capture = Capture::default();
        let console = Console::with_writers(
            Box::new(capture.stdout.clone()),
            Box::new(capture.stderr.clone()),
            false,
        );
        (Arc::new(console), capture)
    }

    /// The shared process-wide console.
    pub fn global() -> Arc<Console> {
        Arc::clone(&GLOBAL)
    }

    pub fn colors(&self) -> bool {
        self.colors.load(Ordering::Relaxed)
    }

    pub fn set_colors(&self, colors: bool) {
        self.colors.store(colors, Ordering::Relaxed);
    }

    /// Resolves `mode` against the environment and the real output streams.
    pub fn set_color_mode(&self, mode: ColorMode) {
        let colors = match mode {
            ColorMode::Auto => {
                env_allows_color() && Stream::Stdout.is_terminal() && Stream::Stderr.is_terminal()
            }
            other => other.resolve(Stream::Stdout),
        };
        self.set_colors(colors);
    }

    pub fn min_level(&self) -> Level {
        let raw = self.min_level.load(Ordering::Relaxed);
        Level::ALL
            .into_iter()
            .find(|l| *l as i32 == raw)
            .unwrap_or(Level::Debug)
    }

    /// Lines below `level` are dropped.
    pub fn set_min_level(&self, level: Level) {
        self.min_level.store(level as i32, Ordering::Relaxed);
    }

    pub fn enabled(&self, level: Level) -> bool {
        level as i32 >= self.min_level.load(Ordering::Relaxed)
    }

    pub fn set_error_handler<F>(&self, handler: F)
    where
        F: Fn(io::Error) + Send + Sync + 'static,
    {
        let mut slot = self.error_handler.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(Arc::new(handler));
    }

    pub fn clear_error_handler(&self) {
        let mut slot = self.error_handler.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    /// Writes one log line: `prefix : [LEVEL] : msg`.
    pub fn write_line(&self, level: Level, prefix: &str, msg: &str) {
        if !self.enabled(level) {
            return;
        }

        let colors = self.colors();
        // Take the buffer out so a re-entrant call from an error handler cannot double-borrow.
        let mut line = LINE_BUF.with(|buf| buf.take());
        line.clear();
        format_line_into(&mut line, level, prefix, msg, colors);
        self.write_raw(level.stream(), line.as_bytes());
        LINE_BUF.with(|buf| buf.replace(line));
    }

    /// Writes an unlabeled `prefix : msg` line to stdout, ignoring the
    /// minimum level. Timer and test reports go through here.
    pub fn print_line(&self, prefix: &str, msg: &str) {
        let mut line = LINE_BUF.with(|buf| buf.take());
        line.clear();
        format_line_into(&mut line, Level::Message, prefix, msg, self.colors());
        self.write_raw(Stream::Stdout, line.as_bytes());
        LINE_BUF.with(|buf| buf.replace(line));
    }

    /// Writes pre-formatted text to one stream under the console lock.
    pub fn write_str(&self, stream: Stream, text: &str) {
        self.write_raw(stream, text.as_bytes());
    }

    fn write_raw(&self, stream: Stream, bytes: &[u8]) {
        let mut writers = self.writers.lock().unwrap_or_else(|e| e.into_inner());
        let writer = match stream {
            Stream::Stdout => &mut writers.stdout,
            Stream::Stderr => &mut writers.stderr,
        };

        let Err(e) = writer.write_all(bytes).and_then(|()| writer.flush()) else {
            return;
        };

        let handler = self
            .error_handler
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        if let Some(handler) = handler {
            drop(writers);
            handler(e);
        } else if !writers.has_warned_io_failure {
            writers.has_warned_io_failure = true;
            drop(writers);
            tracing::warn!(error = %e, "console write failed");
            let _ = io::stderr().write_all(format!("warp_log: write failed: {e}\n").as_bytes());
        }
    }
}

/// Assembles a log line into `out` (including the trailing newline).
///
/// The separator before the level label only appears when there is a
/// prefix; the separator before the message appears when there is a label or
/// anything before it.
pub fn format_line_into(out: &mut String, level: Level, prefix: &str, msg: &str, colors: bool) {
    out.push_str(prefix);

    if level.has_label() {
        if !prefix.is_empty() {
            out.push_str(SEPARATOR);
        }
        let style = Style::new().foreground(level.color());
        out.push_str(&style.render_with(level.label(), colors));
    }

    if level.has_label() || !out.is_empty() {
        out.push_str(SEPARATOR);
    }

    out.push_str(msg);
    out.push('\n');
}

/// Convenience wrapper around [`format_line_into`].
pub fn format_line(level: Level, prefix: &str, msg: &str, colors: bool) -> String {
    let mut out = String::with_capacity(prefix.len() + msg.len() + 16);
    format_line_into(&mut out, level, prefix, msg, colors);
    out
}

/// Cloneable in-memory writer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Read side of [`Console::capture`].
#[derive(Debug, Clone, Default)]
pub struct Capture {
    stdout: SharedBuffer,
    stderr: SharedBuffer,
}

impl Capture {
    pub fn stdout(&self) -> String {
        self.stdout.contents()
    }

    pub fn stderr(&self) -> String {
        self.stderr.contents()
    }

    /// Stdout lines, without their newlines.
    pub fn stdout_lines(&self) -> Vec<String> {
        self.stdout().lines().map(str::to_string).collect()
    }

    /// Stderr lines, without their newlines.
    pub fn stderr_lines(&self) -> Vec<String> {
        self.stderr().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.stdout.clear();
        self.stderr.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A writer that always fails for testing error handling.
    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("simulated failure"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("simulated failure"))
        }
    }

    #[test]
    fn line_with_prefix_and_label() {
        let line = format_line(Level::Info, "[APP]", "started", false);
        assert_eq!(line, "[APP] : [INFO] : started\n");
    }

    #[test]
    fn line_without_prefix() {
        assert_eq!(format_line(Level::Warn, "", "careful", false), "[WARN] : careful\n");
    }

    #[test]
    fn message_line_with_prefix() {
        assert_eq!(format_line(Level::Message, "[TIMER]", "done", false), "[TIMER] : done\n");
    }

    #[test]
    fn bare_message_line() {
        assert_eq!(format_line(Level::Message, "", "raw", false), "raw\n");
    }

    #[test]
    fn colored_label() {
        let line = format_line(Level::Error, "", "boom", true);
        assert_eq!(line, "\x1b[31m[ERROR]\x1b[0m : boom\n");
    }

    #[test]
    fn routes_by_level() {
        let (console, capture) = Console::capture();
        console.write_line(Level::Info, "", "to stdout");
        console.write_line(Level::Error, "", "to stderr");
        assert_eq!(capture.stdout_lines(), vec!["[INFO] : to stdout"]);
        assert_eq!(capture.stderr_lines(), vec!["[ERROR] : to stderr"]);
    }

    #[test]
    fn message_goes_to_stderr() {
        let (console, capture) = Console::capture();
        console.write_line(Level::Message, "[P]", "note");
        assert!(capture.stdout().is_empty());
        assert_eq!(capture.stderr(), "[P] : note\n");
    }

    #[test]
    fn print_line_ignores_min_level() {
        let (console, capture) = Console::capture();
        console.set_min_level(Level::Error);
        console.print_line("[TIMER]", "report");
        console.print_line("", "bare");
        assert_eq!(capture.stdout_lines(), vec!["[TIMER] : report", "bare"]);
        assert!(capture.stderr().is_empty());
    }

    #[test]
    fn min_level_filters() {
        let (console, capture) = Console::capture();
        console.set_min_level(Level::Warn);
        console.write_line(Level::Info, "", "dropped");
        console.write_line(Level::Message, "", "dropped too");
        console.write_line(Level::Warn, "", "kept");
        assert!(capture.stdout().is_empty());
        assert_eq!(capture.stderr_lines().len(), 1);
        assert_eq!(console.min_level(), Level::Warn);
    }

    #[test]
    fn error_handler_called_on_io_failure() {
        use std::sync::atomic::AtomicUsize;

        let console = Console::with_writers(Box::new(FailingWriter), Box::new(FailingWriter), false);
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        console.set_error_handler(move |err| {
            assert!(err.to_string().contains("simulated failure"));
            counter.fetch_add(1, Ordering::Relaxed);
        });

        console.write_line(Level::Info, "", "one");
        console.write_line(Level::Error, "", "two");
        assert_eq!(count.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn default_behavior_warns_once() {
        let console = Console::with_writers(Box::new(FailingWriter), Box::new(FailingWriter), false);
        console.write_line(Level::Info, "", "first");
        console.write_line(Level::Info, "", "second");
        let writers = console.writers.lock().unwrap();
        assert!(writers.has_warned_io_failure);
    }

    #[test]
    fn write_str_is_verbatim() {
        let (console, capture) = Console::capture();
        console.write_str(Stream::Stdout, "a\nb\n");
        assert_eq!(capture.stdout(), "a\nb\n");
    }
}
