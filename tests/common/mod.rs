// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed workspace, an in-memory console,
// and a fluent builder so each integration test can set up an isolated log
// destination without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use buildlog::config::{ArgList, LogOptions, load_stored};
use buildlog::logging::{Console, LineWidth, LogRegistry, LogSink};

/// A cloneable in-memory writer standing in for stdout.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Everything written so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("buffer lock")).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// An isolated workspace backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct IntegrationTestContext {
    /// Temporary directory holding the log and config files.
    pub root: tempfile::TempDir,
    /// Registry shared by every sink created from this context.
    pub registry: Arc<LogRegistry>,
}

impl IntegrationTestContext {
    /// Create a context whose registry scrolls and elides nothing.
    pub fn new() -> Self {
        Self::with_line_width(LineWidth::Scroll)
    }

    /// Create a context whose registry is preset to `width`.
    pub fn with_line_width(width: LineWidth) -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        let registry = Arc::new(
            LogRegistry::new()
                .with_noise_prefix(None)
                .with_line_width(width),
        );
        Self { root, registry }
    }

    /// Path to the workspace root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Path of the default log file inside the workspace.
    pub fn log_path(&self) -> PathBuf {
        self.root.path().join("build.log")
    }

    /// Path of the backup made when the log is replaced.
    pub fn backup_path(&self) -> PathBuf {
        self.root.path().join("build.log.bkp")
    }

    /// Current log file contents.
    pub fn log_contents(&self) -> String {
        std::fs::read_to_string(self.log_path()).expect("read log file")
    }

    /// Default options pointed at this workspace's log file.
    pub fn options(&self) -> LogOptions {
        LogOptions {
            log: self.log_path(),
            ..LogOptions::default()
        }
    }

    /// Resolve options from `buildlog.toml` in the workspace plus `args`.
    pub fn resolve_options(&self, args: &[&str]) -> LogOptions {
        let stored = load_stored(&self.root.path().join("buildlog.toml")).expect("load config");
        let cli = ArgList::new(args.iter().copied());
        LogOptions::resolve(&[&cli, &stored]).expect("resolve options")
    }

    /// Set up a sink on this context's registry with a captured console.
    pub fn sink(&self, options: &LogOptions, interactive: bool) -> (LogSink, SharedBuffer) {
        let buf = SharedBuffer::default();
        let console = Console::new(buf.clone(), interactive);
        let sink = LogSink::setup(Arc::clone(&self.registry), options, Some(console))
            .expect("set up sink");
        (sink, buf)
    }
}

/// Fluent builder for [`IntegrationTestContext`].
///
/// Allows individual tests to seed the workspace before the context is
/// finalised without modifying the shared setup.
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context with a scrolling registry.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Begin building a new context preset to `width`.
    pub fn with_line_width(width: LineWidth) -> Self {
        Self {
            ctx: IntegrationTestContext::with_line_width(width),
        }
    }

    /// Write `content` to `buildlog.toml` in the workspace.
    pub fn with_config_file(self, content: &str) -> Self {
        std::fs::write(self.ctx.root.path().join("buildlog.toml"), content)
            .expect("write config file");
        self
    }

    /// Seed an existing log file from a previous run.
    pub fn with_previous_log(self, content: &str) -> Self {
        std::fs::write(self.ctx.log_path(), content).expect("write previous log");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}
