//! Opening the persistent log file under the backup-or-append policy.
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::types::OpenMode;
use super::utils::backup_path;
use crate::error::DestinationError;

/// The shared handle to one on-disk log file.
#[derive(Debug)]
pub struct LogFile {
    path: PathBuf,
    mode: OpenMode,
    file: Mutex<File>,
}

impl LogFile {
    /// Open `path`, backing up or appending to any existing file.
    ///
    /// - No file at `path`: create it.
    /// - `append`: open the existing file for appending.
    /// - Otherwise rename it to `<path>.bkp` (replacing an older backup) and
    ///   create a fresh file. If the rename fails, warn and append instead.
    ///
    /// # Errors
    ///
    /// Returns [`DestinationError::Open`] if the file cannot be opened,
    /// including after the append fallback.
    pub(super) fn open(path: &Path, append: bool) -> Result<Self, DestinationError> {
        let (file, mode) = if !path.exists() {
            (create(path), OpenMode::Created)
        } else if append {
            (open_append(path), OpenMode::Appended)
        } else {
            let backup = backup_path(path);
            match fs::rename(path, &backup) {
                Ok(()) => {
                    tracing::debug!(backup = %backup.display(), "backed up previous log");
                    (create(path), OpenMode::Replaced)
                }
                Err(e) => {
                    tracing::warn!("Cannot backup log file, appending instead.");
                    tracing::debug!(path = %path.display(), error = %e, "log backup failed");
                    (open_append(path), OpenMode::AppendedAfterBackupFailure)
                }
            }
        };

        let file = file.map_err(|source| DestinationError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), ?mode, "opened log file");
        Ok(Self {
            path: path.to_path_buf(),
            mode,
            file: Mutex::new(file),
        })
    }

    /// Path the file was opened at.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// How the file was opened.
    #[must_use]
    pub const fn mode(&self) -> OpenMode {
        self.mode
    }

    /// Write `text` and flush. Write errors are ignored.
    pub(super) fn write_str(&self, text: &str) {
        let mut f = self
            .file
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f.write_all(text.as_bytes()).ok();
        f.flush().ok();
    }
}

fn create(path: &Path) -> io::Result<File> {
    File::create(path)
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().append(true).create(true).open(path)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("build.log");
        let log = LogFile::open(&path, false).unwrap();
        assert_eq!(log.mode(), OpenMode::Created);
        assert!(path.exists());
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn append_keeps_existing_content() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("build.log");
        fs::write(&path, "old\n").unwrap();
        let log = LogFile::open(&path, true).unwrap();
        log.write_str("new\n");
        assert_eq!(log.mode(), OpenMode::Appended);
        assert_eq!(fs::read_to_string(&path).unwrap(), "old\nnew\n");
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn replace_moves_existing_file_to_backup() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("build.log");
        fs::write(&path, "previous run\n").unwrap();
        let log = LogFile::open(&path, false).unwrap();
        log.write_str("fresh\n");
        assert_eq!(log.mode(), OpenMode::Replaced);
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
        assert_eq!(
            fs::read_to_string(backup_path(&path)).unwrap(),
            "previous run\n"
        );
    }

    #[test]
    fn replace_overwrites_older_backup() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("build.log");
        fs::write(backup_path(&path), "ancient\n").unwrap();
        fs::write(&path, "previous\n").unwrap();
        LogFile::open(&path, false).unwrap();
        assert_eq!(
            fs::read_to_string(backup_path(&path)).unwrap(),
            "previous\n"
        );
    }

    #[test]
    fn failed_backup_falls_back_to_append() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("build.log");
        fs::write(&path, "keep me\n").unwrap();
        // A non-empty directory at the backup path makes the rename fail.
        let blocker = backup_path(&path);
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("occupied"), "").unwrap();

        let log = LogFile::open(&path, false).unwrap();
        log.write_str("appended\n");
        assert_eq!(log.mode(), OpenMode::AppendedAfterBackupFailure);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "keep me\nappended\n"
        );
    }

    #[test]
    fn failed_backup_emits_one_warning() {
        use tracing_subscriber::layer::SubscriberExt as _;

        #[derive(Default, Clone)]
        struct Warnings(std::sync::Arc<Mutex<Vec<String>>>);

        impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Warnings {
            fn on_event(
                &self,
                event: &tracing::Event<'_>,
                _ctx: tracing_subscriber::layer::Context<'_, S>,
            ) {
                if *event.metadata().level() != tracing::Level::WARN {
                    return;
                }
                let mut extractor = crate::logging::subscriber::MessageExtractor::default();
                event.record(&mut extractor);
                self.0.lock().unwrap().push(extractor.message);
            }
        }

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("build.log");
        fs::write(&path, "keep me\n").unwrap();
        let blocker = backup_path(&path);
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("occupied"), "").unwrap();

        let warnings = Warnings::default();
        let subscriber = tracing_subscriber::registry().with(warnings.clone());
        let log = tracing::subscriber::with_default(subscriber, || {
            LogFile::open(&path, false).unwrap()
        });

        assert_eq!(log.mode(), OpenMode::AppendedAfterBackupFailure);
        let seen = warnings.0.lock().unwrap().clone();
        assert_eq!(seen, vec!["Cannot backup log file, appending instead.".to_string()]);
    }

    #[test]
    fn successful_backup_does_not_warn() {
        use tracing_subscriber::layer::SubscriberExt as _;

        #[derive(Default, Clone)]
        struct WarnCount(std::sync::Arc<std::sync::atomic::AtomicUsize>);

        impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for WarnCount {
            fn on_event(
                &self,
                event: &tracing::Event<'_>,
                _ctx: tracing_subscriber::layer::Context<'_, S>,
            ) {
                if *event.metadata().level() == tracing::Level::WARN {
                    self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                }
            }
        }

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("build.log");
        fs::write(&path, "previous\n").unwrap();

        let count = WarnCount::default();
        let subscriber = tracing_subscriber::registry().with(count.clone());
        tracing::subscriber::with_default(subscriber, || {
            LogFile::open(&path, false).unwrap();
        });
        assert_eq!(count.0.load(std::sync::atomic::Ordering::Relaxed), 0);
    }

    #[test]
    fn unopenable_path_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("missing-dir").join("build.log");
        let err = LogFile::open(&path, false).unwrap_err();
        assert!(matches!(err, DestinationError::Open { .. }));
    }
}
