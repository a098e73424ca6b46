//! Shared state for every sink in a process: open log files and the
//! terminal line width.
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use super::destination::LogFile;
use super::types::LineWidth;
use super::utils::default_noise_prefix;
use crate::error::DestinationError;

/// Registry shared by reference between [`LogSink`](super::LogSink)s.
///
/// Holds at most one open [`LogFile`] per resolved path and a line width
/// that is decided once. Both follow first-writer-wins: the first sink to
/// open a path or to decide the width fixes it for everyone else, even if a
/// later sink was configured differently.
#[derive(Debug)]
pub struct LogRegistry {
    files: Mutex<HashMap<PathBuf, Arc<LogFile>>>,
    line_width: OnceLock<LineWidth>,
    noise_prefix: Option<String>,
}

impl Default for LogRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LogRegistry {
    /// Create an empty registry whose noise prefix is the working directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            line_width: OnceLock::new(),
            noise_prefix: default_noise_prefix(),
        }
    }

    /// Replace the directory prefix elided from overwrite-mode console lines.
    #[must_use]
    pub fn with_noise_prefix(mut self, prefix: Option<String>) -> Self {
        self.noise_prefix = prefix;
        self
    }

    /// Fix the line width up front, before any sink decides it.
    #[must_use]
    pub fn with_line_width(self, width: LineWidth) -> Self {
        self.line_width.set(width).ok();
        self
    }

    /// Directory prefix elided from overwrite-mode console lines.
    #[must_use]
    pub fn noise_prefix(&self) -> &str {
        self.noise_prefix.as_deref().unwrap_or_default()
    }

    /// Return the shared log file for `path`, opening it on first request.
    ///
    /// Later requests for the same path return the cached handle and ignore
    /// `append`; the file is never backed up twice.
    ///
    /// # Errors
    ///
    /// Returns [`DestinationError::Open`] if the file has to be opened and
    /// cannot be.
    pub fn log_file(&self, path: &Path, append: bool) -> Result<Arc<LogFile>, DestinationError> {
        let key = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let mut files = self
            .files
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(existing) = files.get(&key) {
            return Ok(Arc::clone(existing));
        }
        let file = Arc::new(LogFile::open(path, append)?);
        files.insert(key, Arc::clone(&file));
        drop(files);
        Ok(file)
    }

    /// Number of distinct log files opened through this registry.
    #[must_use]
    pub fn open_files(&self) -> usize {
        self.files
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Return the cached line width, running `decide` only if none is set.
    #[must_use]
    pub fn line_width(&self, decide: impl FnOnce() -> LineWidth) -> LineWidth {
        *self.line_width.get_or_init(decide)
    }
}

/// Decide the console line width for one sink.
///
/// Scrolls when the console is disabled, not a terminal, or scrolling is
/// forced; otherwise asks `query` for the column count and scrolls if it
/// has no answer.
#[must_use]
pub fn decide_line_width(
    console_enabled: bool,
    interactive: bool,
    scroll_output: bool,
    query: impl FnOnce() -> Option<usize>,
) -> LineWidth {
    if !console_enabled || !interactive || scroll_output {
        return LineWidth::Scroll;
    }
    query().map_or(LineWidth::Scroll, LineWidth::from_columns)
}
