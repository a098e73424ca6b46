//! The console destination: any writer plus an interactivity flag.
use std::fmt;
use std::io::{self, IsTerminal as _, Write};

/// Console destination for a [`LogSink`](super::LogSink).
///
/// Wraps an arbitrary writer together with whether it is an interactive
/// terminal, which decides if single-line overwrite mode is possible.
pub struct Console {
    writer: Box<dyn Write + Send>,
    interactive: bool,
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("interactive", &self.interactive)
            .finish_non_exhaustive()
    }
}

impl Console {
    /// Standard output, interactive when attached to a terminal.
    #[must_use]
    pub fn stdout() -> Self {
        let stdout = io::stdout();
        let interactive = stdout.is_terminal();
        Self {
            writer: Box::new(stdout),
            interactive,
        }
    }

    /// Wrap `writer`, declaring whether it behaves like a terminal.
    #[must_use]
    pub fn new(writer: impl Write + Send + 'static, interactive: bool) -> Self {
        Self {
            writer: Box::new(writer),
            interactive,
        }
    }

    /// Whether the console is an interactive terminal.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Write `text` and flush. Write errors are ignored.
    pub(super) fn write_str(&mut self, text: &str) {
        self.writer.write_all(text.as_bytes()).ok();
        self.writer.flush().ok();
    }
}
