//! Utility functions for line fitting, path elision, and terminal queries.
use std::ffi::OsString;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Truncate `line` to `width` characters and pad it with spaces to exactly
/// `width` characters.
///
/// Counts `char`s, not display columns: wide glyphs are not accounted for.
pub(super) fn fit_to_width(line: &str, width: usize) -> String {
    let mut out: String = line.chars().take(width).collect();
    let used = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}

/// Remove every occurrence of `prefix` from `msg`.
///
/// An empty prefix leaves the message untouched.
pub(super) fn strip_noise(msg: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        msg.to_string()
    } else {
        msg.replace(prefix, "")
    }
}

/// The working directory with a trailing separator, used as the default
/// noise prefix so absolute paths under it print as relative ones.
pub(super) fn default_noise_prefix() -> Option<String> {
    let cwd = std::env::current_dir().ok()?;
    let mut prefix = cwd.to_str()?.to_string();
    if !prefix.ends_with(MAIN_SEPARATOR) {
        prefix.push(MAIN_SEPARATOR);
    }
    Some(prefix)
}

/// Return `<path>.bkp`.
pub(super) fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".bkp");
    PathBuf::from(name)
}

/// Query the controlling terminal for its column count.
///
/// Returns `None` when stdout is not attached to a terminal or the query
/// fails.
pub(super) fn terminal_columns() -> Option<usize> {
    terminal_size::terminal_size().map(|(terminal_size::Width(w), _)| usize::from(w))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn fit_pads_short_lines() {
        assert_eq!(fit_to_width("abc", 6), "abc   ");
    }

    #[test]
    fn fit_truncates_long_lines() {
        assert_eq!(fit_to_width("abcdefgh", 4), "abcd");
    }

    #[test]
    fn fit_exact_width_is_unchanged() {
        assert_eq!(fit_to_width("abcd", 4), "abcd");
    }

    #[test]
    fn fit_counts_chars_not_bytes() {
        let fitted = fit_to_width("héllo wörld", 5);
        assert_eq!(fitted, "héllo");
        assert_eq!(fit_to_width("é", 3).chars().count(), 3);
    }

    #[test]
    fn strip_noise_removes_all_occurrences() {
        assert_eq!(
            strip_noise("/work/a.c and /work/b.c", "/work/"),
            "a.c and b.c"
        );
    }

    #[test]
    fn strip_noise_empty_prefix_is_identity() {
        assert_eq!(strip_noise("/work/a.c", ""), "/work/a.c");
    }

    #[test]
    fn default_noise_prefix_ends_with_separator() {
        if let Some(prefix) = default_noise_prefix() {
            assert!(prefix.ends_with(MAIN_SEPARATOR));
        }
    }

    #[test]
    fn backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("out/build.log")),
            PathBuf::from("out/build.log.bkp")
        );
    }
}
