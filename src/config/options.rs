//! Resolved logging options with layered lookup and validation.
use std::path::PathBuf;

use serde::Serialize;

use super::source::OptionSource;
use crate::error::ConfigError;

/// Exclusive upper bound for `debugLevel`.
pub const DEBUG_LEVEL_LIMIT: u8 = 5;

/// Every option recognized by the build log, fully resolved.
///
/// Field names serialize in the same camelCase spelling that option sources
/// use, so the output of [`LogOptions::to_toml`] can be fed back in as a
/// stored configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogOptions {
    /// Target path for the persistent log file.
    pub log: PathBuf,
    /// Append to an existing log instead of backing it up.
    pub log_append: bool,
    /// Highest message level shown on the console (0–4).
    pub debug_level: u8,
    /// Sections shown on the console; empty means all.
    pub debug_sections: Vec<String>,
    /// String emitted once per indentation level.
    pub debug_indent: String,
    /// Always scroll instead of overwriting a single console line.
    pub scroll_output: bool,
    /// Suppress console output entirely.
    pub no_output: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            log: PathBuf::from("build.log"),
            log_append: false,
            debug_level: 3,
            debug_sections: Vec::new(),
            debug_indent: "  ".to_string(),
            scroll_output: false,
            no_output: false,
        }
    }
}

impl LogOptions {
    /// Resolve every option from `sources`, consulted in order.
    ///
    /// The first source that has a value for an option wins; options no
    /// source mentions keep their default. Pass the command line first so it
    /// overrides stored configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any supplied value has the wrong shape or
    /// `debugLevel` is outside `0..5`.
    pub fn resolve(sources: &[&dyn OptionSource]) -> Result<Self, ConfigError> {
        let lookup = |name: &str| sources.iter().find_map(|s| s.lookup(name));
        let mut options = Self::default();

        if let Some(v) = lookup("log") {
            options.log = PathBuf::from(v.into_text("log")?);
        }
        if let Some(v) = lookup("logAppend") {
            options.log_append = v.into_bool("logAppend")?;
        }
        if let Some(v) = lookup("debugLevel") {
            options.debug_level = validate_debug_level(v.into_int("debugLevel")?)?;
        }
        if let Some(v) = lookup("debugSections") {
            options.debug_sections = v.into_list("debugSections")?;
        }
        if let Some(v) = lookup("debugIndent") {
            options.debug_indent = v.into_text("debugIndent")?;
        }
        if let Some(v) = lookup("scrollOutput") {
            options.scroll_output = v.into_bool("scrollOutput")?;
        }
        if let Some(v) = lookup("noOutput") {
            options.no_output = v.into_bool("noOutput")?;
        }

        tracing::debug!(
            log = %options.log.display(),
            debug_level = options.debug_level,
            "resolved log options"
        );
        Ok(options)
    }

    /// Render the options as a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the log path is not valid UTF-8.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

fn validate_debug_level(value: i64) -> Result<u8, ConfigError> {
    u8::try_from(value)
        .ok()
        .filter(|&level| level < DEBUG_LEVEL_LIMIT)
        .ok_or_else(|| ConfigError::OutOfRange {
            option: "debugLevel".to_string(),
            value,
            min: 0,
            max: i64::from(DEBUG_LEVEL_LIMIT),
        })
}
