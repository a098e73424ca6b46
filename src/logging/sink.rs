//! Filtered, dual-destination writer with terminal-aware line rewriting.
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::console::Console;
use super::destination::LogFile;
use super::format::{self, DebugValue};
use super::registry::{LogRegistry, decide_line_width};
use super::types::{DividerStyle, Destination, LineOpts, LineWidth, SCREEN_SECTION};
use super::utils::{fit_to_width, strip_noise, terminal_columns};
use crate::config::LogOptions;
use crate::error::BuildLogError;

/// Width of the rules drawn by [`LogSink::print_divider`].
pub const DIVIDER_WIDTH: usize = 81;

/// Indentation added to each line inside [`LogSink::print_box`].
const BOX_MARGIN: &str = "      ";

/// Writes messages to the console and the persistent log file.
///
/// The log file receives every message. The console only receives messages
/// whose level is at most the configured debug level and, when debug
/// sections are configured, whose section is one of them.
///
/// On an interactive console the sink runs in overwrite mode: each message
/// replaces the current line (carriage return, truncate, pad) and no newline
/// is written, which suits progress-style status output. Otherwise every
/// message scrolls.
#[derive(Debug)]
pub struct LogSink {
    registry: Arc<LogRegistry>,
    console: Option<Mutex<Console>>,
    file: Option<Arc<LogFile>>,
    debug_level: u8,
    debug_sections: BTreeSet<String>,
    debug_indent: String,
    line_width: LineWidth,
    depth: AtomicUsize,
}

impl LogSink {
    /// Configure a sink from resolved options.
    ///
    /// Opens (or reuses) the log file named by `options.log` through
    /// `registry`, disables `console` when `options.no_output` is set, and
    /// fixes the line width.
    ///
    /// # Errors
    ///
    /// Returns [`BuildLogError::Destination`] if the log file cannot be
    /// opened.
    pub fn setup(
        registry: Arc<LogRegistry>,
        options: &LogOptions,
        console: Option<Console>,
    ) -> Result<Self, BuildLogError> {
        let file = registry.log_file(&options.log, options.log_append)?;
        Ok(Self::build(registry, options, console, Some(file)))
    }

    /// Configure a sink that writes to the console only.
    #[must_use]
    pub fn console_only(
        registry: Arc<LogRegistry>,
        options: &LogOptions,
        console: Option<Console>,
    ) -> Self {
        Self::build(registry, options, console, None)
    }

    fn build(
        registry: Arc<LogRegistry>,
        options: &LogOptions,
        console: Option<Console>,
        file: Option<Arc<LogFile>>,
    ) -> Self {
        let console = console.filter(|_| !options.no_output);
        let interactive = console.as_ref().is_some_and(Console::is_interactive);
        let line_width = registry.line_width(|| {
            decide_line_width(
                console.is_some(),
                interactive,
                options.scroll_output,
                terminal_columns,
            )
        });
        tracing::debug!(?line_width, console = console.is_some(), "log sink ready");
        Self {
            registry,
            console: console.map(Mutex::new),
            file,
            debug_level: options.debug_level,
            debug_sections: options.debug_sections.iter().cloned().collect(),
            debug_indent: options.debug_indent.clone(),
            line_width,
            depth: AtomicUsize::new(0),
        }
    }

    /// Console threshold.
    #[must_use]
    pub const fn debug_level(&self) -> u8 {
        self.debug_level
    }

    /// Console line layout.
    #[must_use]
    pub const fn line_width(&self) -> LineWidth {
        self.line_width
    }

    /// Shared log file, if any.
    #[must_use]
    pub fn log_file(&self) -> Option<&LogFile> {
        self.file.as_deref()
    }

    /// Whether console output is enabled.
    #[must_use]
    pub const fn console_enabled(&self) -> bool {
        self.console.is_some()
    }

    /// Current indentation depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth.load(Ordering::Relaxed)
    }

    /// Enter a nested scope; lines are indented one more level until the
    /// returned guard is dropped.
    pub fn scope(&self) -> IndentScope<'_> {
        self.depth.fetch_add(1, Ordering::Relaxed);
        IndentScope { sink: self }
    }

    /// Whether a message at `level` in `section` goes to `destination`.
    ///
    /// The file takes everything; the console filters by level and section.
    /// A disabled destination takes nothing.
    #[must_use]
    pub fn should_write(
        &self,
        destination: Destination,
        level: i32,
        section: Option<&str>,
    ) -> bool {
        match destination {
            Destination::File => self.file.is_some(),
            Destination::Console => {
                self.console.is_some()
                    && level <= i32::from(self.debug_level)
                    && (self.debug_sections.is_empty()
                        || section.is_some_and(|s| self.debug_sections.contains(s)))
            }
        }
    }

    /// Write the rank prefix and indentation for a message.
    pub fn write_indent(&self, level: i32, section: Option<&str>, rank: Option<u32>) {
        let mut text = rank.map_or_else(String::new, |r| format!("[{r}]"));
        text.push_str(&self.debug_indent.repeat(self.depth()));
        if text.is_empty() {
            return;
        }
        for destination in Destination::ALL {
            if self.should_write(destination, level, section) {
                self.emit(destination, &text);
            }
        }
    }

    /// Write `msg` without a trailing newline.
    ///
    /// In overwrite mode (and unless `force_scroll`) the console line is
    /// rewritten in place: carriage return, noise prefix removed, every line
    /// truncated and padded to the terminal width. Otherwise the console gets
    /// the message after a `section: ` prefix, and the file gets it verbatim.
    pub fn write(&self, msg: &str, level: i32, section: Option<&str>, force_scroll: bool) {
        for destination in Destination::ALL {
            if !self.should_write(destination, level, section) {
                continue;
            }
            let text = match (destination, self.line_width.columns()) {
                (Destination::Console, _) if force_scroll => msg.to_string(),
                (Destination::Console, Some(width)) => self.overwrite_text(msg, width),
                (Destination::Console, None) => format!("{}{msg}", section_prefix(section, msg)),
                (Destination::File, _) => msg.to_string(),
            };
            self.emit(destination, &text);
        }
    }

    /// Write an indented message followed by a newline.
    ///
    /// The newline goes to the file and to a scrolling console; an
    /// overwrite-mode console never gets one, so the next message replaces
    /// the line.
    pub fn print_line(&self, msg: &str, opts: LineOpts<'_>) {
        if opts.indent {
            self.write_indent(opts.level, opts.section, opts.rank);
        }
        self.write(msg, opts.level, opts.section, false);
        for destination in Destination::ALL {
            let scrolls = destination == Destination::File || !self.line_width.is_overwrite();
            if scrolls && self.should_write(destination, opts.level, opts.section) {
                self.emit(destination, "\n");
            }
        }
    }

    /// Print a full-width rule.
    pub fn print_divider(&self, level: i32, section: Option<&str>, style: DividerStyle) {
        let rule = style.glyph().to_string().repeat(DIVIDER_WIDTH);
        self.print_line(&rule, LineOpts::level(level).with_section(section));
    }

    /// Print `msg` framed by rules, one indented line per message line,
    /// followed by an empty line. The section defaults to `screen`.
    pub fn print_box(&self, msg: &str, level: i32, section: Option<&str>) {
        let opts = LineOpts::level(level).section(section.unwrap_or(SCREEN_SECTION));
        self.clear_line();
        self.print_divider(opts.level, opts.section, DividerStyle::Double);
        for line in msg.split('\n') {
            self.print_line(&format!("{BOX_MARGIN}{line}"), opts);
        }
        self.print_divider(opts.level, opts.section, DividerStyle::Double);
        self.print_line("", opts);
    }

    /// Return the cursor to the start of the console line (overwrite mode).
    pub fn back_line(&self) {
        if self.line_width.is_overwrite() {
            self.emit(Destination::Console, "\r");
        }
    }

    /// Blank the current console line (overwrite mode).
    pub fn clear_line(&self) {
        if let Some(width) = self.line_width.columns() {
            self.emit(Destination::Console, &format!("\r{}\r", " ".repeat(width)));
        }
    }

    /// Render `value` on one line at this sink's debug level.
    #[must_use]
    pub fn describe(&self, value: DebugValue<'_>) -> String {
        format::describe(value, self.debug_level)
    }

    fn overwrite_text(&self, msg: &str, width: usize) -> String {
        let msg = strip_noise(msg, self.registry.noise_prefix());
        let mut out = String::from('\r');
        for line in msg.split('\n') {
            out.push_str(&fit_to_width(line, width));
        }
        out
    }

    fn emit(&self, destination: Destination, text: &str) {
        match destination {
            Destination::Console => {
                if let Some(console) = &self.console {
                    console
                        .lock()
                        .unwrap_or_else(std::sync::PoisonError::into_inner)
                        .write_str(text);
                }
            }
            Destination::File => {
                if let Some(file) = &self.file {
                    file.write_str(text);
                }
            }
        }
    }
}

/// `"<section>: "` for scrolling console output, or nothing for untagged,
/// `screen`, and empty messages.
fn section_prefix(section: Option<&str>, msg: &str) -> String {
    match section {
        Some(s) if !s.is_empty() && s != SCREEN_SECTION && !msg.is_empty() => format!("{s}: "),
        _ => String::new(),
    }
}

/// Guard returned by [`LogSink::scope`]; restores the depth when dropped.
#[derive(Debug)]
#[must_use = "the indentation ends as soon as the scope guard is dropped"]
pub struct IndentScope<'a> {
    sink: &'a LogSink,
}

impl Drop for IndentScope<'_> {
    fn drop(&mut self) {
        self.sink.depth.fetch_sub(1, Ordering::Relaxed);
    }
}
