//! Core logging types: destinations, line modes, and per-line options.
use std::num::NonZeroUsize;

/// Section name that is never printed as a `section: ` prefix.
pub const SCREEN_SECTION: &str = "screen";

/// Message level that passes every console threshold.
pub const ALWAYS: i32 = -1;

/// One of the two output targets a message may be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The interactive console (stdout by default).
    Console,
    /// The persistent log file; receives every message.
    File,
}

impl Destination {
    /// Both destinations, console first.
    pub const ALL: [Self; 2] = [Self::Console, Self::File];
}

/// How console output is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineWidth {
    /// Every message ends with a newline and the terminal scrolls.
    Scroll,
    /// Each message overwrites the current line, padded to this many columns.
    Columns(NonZeroUsize),
}

impl LineWidth {
    /// Build from a raw column count; zero means scrolling.
    #[must_use]
    pub fn from_columns(columns: usize) -> Self {
        NonZeroUsize::new(columns).map_or(Self::Scroll, Self::Columns)
    }

    /// Column count in overwrite mode, `None` when scrolling.
    #[must_use]
    pub const fn columns(self) -> Option<usize> {
        match self {
            Self::Scroll => None,
            Self::Columns(n) => Some(n.get()),
        }
    }

    /// Whether messages overwrite the current line.
    #[must_use]
    pub const fn is_overwrite(self) -> bool {
        matches!(self, Self::Columns(_))
    }
}

/// How the persistent log file was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// No file existed; a new one was created.
    Created,
    /// An existing file was opened for appending, as requested.
    Appended,
    /// The existing file was renamed to `<path>.bkp` and a fresh one created.
    Replaced,
    /// The backup rename failed, so the existing file was appended to.
    AppendedAfterBackupFailure,
}

/// Rule character used by [`LogSink::print_divider`](super::LogSink::print_divider).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DividerStyle {
    /// A rule of `=`.
    #[default]
    Double,
    /// A rule of `-`.
    Single,
}

impl DividerStyle {
    /// The rule character.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Double => '=',
            Self::Single => '-',
        }
    }
}

/// Per-line options for [`LogSink::print_line`](super::LogSink::print_line).
///
/// Built with chained `const` setters:
///
/// ```
/// use buildlog::logging::LineOpts;
///
/// let opts = LineOpts::level(2).section("compile").rank(3);
/// assert_eq!(opts.section, Some("compile"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineOpts<'a> {
    /// Message level; lower is more important.
    pub level: i32,
    /// Section tag used for filtering and the `section: ` prefix.
    pub section: Option<&'a str>,
    /// Whether to emit the rank prefix and indentation first.
    pub indent: bool,
    /// Distributed rank printed as `[rank]` before the indentation.
    pub rank: Option<u32>,
}

impl<'a> LineOpts<'a> {
    /// Options for a message at `level`, with indentation and no section.
    #[must_use]
    pub const fn level(level: i32) -> Self {
        Self {
            level,
            section: None,
            indent: true,
            rank: None,
        }
    }

    /// Tag the message with `section`.
    #[must_use]
    pub const fn section(mut self, section: &'a str) -> Self {
        self.section = Some(section);
        self
    }

    /// Set or clear the section tag.
    #[must_use]
    pub const fn with_section(mut self, section: Option<&'a str>) -> Self {
        self.section = section;
        self
    }

    /// Skip the indentation and rank prefix.
    #[must_use]
    pub const fn no_indent(mut self) -> Self {
        self.indent = false;
        self
    }

    /// Prefix the line with `[rank]`.
    #[must_use]
    pub const fn rank(mut self, rank: u32) -> Self {
        self.rank = Some(rank);
        self
    }

    /// Set or clear the rank prefix.
    #[must_use]
    pub const fn with_rank(mut self, rank: Option<u32>) -> Self {
        self.rank = rank;
        self
    }
}

impl Default for LineOpts<'_> {
    fn default() -> Self {
        Self::level(ALWAYS)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn line_width_zero_columns_scrolls() {
        assert_eq!(LineWidth::from_columns(0), LineWidth::Scroll);
        assert_eq!(LineWidth::from_columns(0).columns(), None);
        assert!(!LineWidth::Scroll.is_overwrite());
    }

    #[test]
    fn line_width_positive_columns_overwrite() {
        let width = LineWidth::from_columns(80);
        assert!(width.is_overwrite());
        assert_eq!(width.columns(), Some(80));
    }

    #[test]
    fn line_opts_builder_chains() {
        let opts = LineOpts::level(2).section("link").no_indent().rank(7);
        assert_eq!(opts.level, 2);
        assert_eq!(opts.section, Some("link"));
        assert!(!opts.indent);
        assert_eq!(opts.rank, Some(7));
    }

    #[test]
    fn line_opts_default_always_passes() {
        let opts = LineOpts::default();
        assert_eq!(opts.level, ALWAYS);
        assert!(opts.indent);
        assert_eq!(opts.section, None);
    }

    #[test]
    fn divider_glyphs() {
        assert_eq!(DividerStyle::Double.glyph(), '=');
        assert_eq!(DividerStyle::Single.glyph(), '-');
        assert_eq!(DividerStyle::default(), DividerStyle::Double);
    }
}
