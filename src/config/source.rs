//! Option sources: stored TOML configuration and raw command-line words.
use std::fmt;
use std::path::Path;

use crate::error::ConfigError;

/// A raw option value as supplied by a source, before coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Free-form text (paths, indent strings, unparsed numbers).
    Text(String),
    /// An integer.
    Integer(i64),
    /// A boolean flag.
    Boolean(bool),
    /// A list of names.
    List(Vec<String>),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::List(items) => write!(f, "[{}]", items.join(",")),
        }
    }
}

impl OptionValue {
    /// Coerce to a boolean.
    ///
    /// Accepts booleans, the integers `0`/`1`, and the usual textual
    /// spellings (`true`, `no`, `on`, `0`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidType`] for anything else.
    pub fn into_bool(self, option: &str) -> Result<bool, ConfigError> {
        let invalid = || ConfigError::InvalidType {
            option: option.to_string(),
            expected: "a boolean",
        };
        match self {
            Self::Boolean(b) => Ok(b),
            Self::Integer(0) => Ok(false),
            Self::Integer(1) => Ok(true),
            Self::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(invalid()),
            },
            Self::Integer(_) | Self::List(_) => Err(invalid()),
        }
    }

    /// Coerce to an integer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotAnInteger`] unless the value is an integer
    /// or text that parses as one.
    pub fn into_int(self, option: &str) -> Result<i64, ConfigError> {
        match self {
            Self::Integer(i) => Ok(i),
            Self::Text(s) => s.trim().parse().map_err(|_| ConfigError::NotAnInteger {
                option: option.to_string(),
                value: s.clone(),
            }),
            other => Err(ConfigError::NotAnInteger {
                option: option.to_string(),
                value: other.to_string(),
            }),
        }
    }

    /// Coerce to a list of names.
    ///
    /// Text is split on commas; an enclosing `[...]` is tolerated so that
    /// `[compile,link]` and `compile,link` mean the same thing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidType`] for integers and booleans.
    pub fn into_list(self, option: &str) -> Result<Vec<String>, ConfigError> {
        match self {
            Self::List(items) => Ok(items),
            Self::Text(s) => {
                let trimmed = s.trim();
                let inner = trimmed
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
                    .unwrap_or(trimmed);
                Ok(inner
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect())
            }
            Self::Integer(_) | Self::Boolean(_) => Err(ConfigError::InvalidType {
                option: option.to_string(),
                expected: "a list of names",
            }),
        }
    }

    /// Coerce to text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidType`] for anything but text.
    pub fn into_text(self, option: &str) -> Result<String, ConfigError> {
        match self {
            Self::Text(s) => Ok(s),
            _ => Err(ConfigError::InvalidType {
                option: option.to_string(),
                expected: "a string",
            }),
        }
    }
}

/// Anything that can answer "what is the value of option X".
pub trait OptionSource {
    /// Return the raw value of `name`, or `None` when this source is silent.
    fn lookup(&self, name: &str) -> Option<OptionValue>;
}

impl OptionSource for toml::Table {
    fn lookup(&self, name: &str) -> Option<OptionValue> {
        self.get(name).map(from_toml)
    }
}

fn from_toml(value: &toml::Value) -> OptionValue {
    match value {
        toml::Value::String(s) => OptionValue::Text(s.clone()),
        toml::Value::Integer(i) => OptionValue::Integer(*i),
        toml::Value::Boolean(b) => OptionValue::Boolean(*b),
        toml::Value::Array(items) => OptionValue::List(
            items
                .iter()
                .map(|v| v.as_str().map_or_else(|| v.to_string(), String::from))
                .collect(),
        ),
        other => OptionValue::Text(other.to_string()),
    }
}

/// Load the stored option table from a TOML file.
///
/// A missing file is not an error and yields an empty table, so every
/// option falls through to the next source or its default.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file exists but cannot be read, or
/// [`ConfigError::Parse`] if it is not valid TOML.
pub fn load_stored(path: &Path) -> Result<toml::Table, ConfigError> {
    if !path.exists() {
        return Ok(toml::Table::new());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Raw command-line words searched for `-name=value` overrides.
///
/// Recognizes `-name=value`, `--name=value`, and a bare `-name` (read as
/// boolean `true`). When an option appears more than once the last
/// occurrence wins. Words that match no requested option are ignored.
#[derive(Debug, Clone, Default)]
pub struct ArgList {
    words: Vec<String>,
}

impl ArgList {
    /// Wrap a sequence of command-line words.
    #[must_use]
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

impl OptionSource for ArgList {
    fn lookup(&self, name: &str) -> Option<OptionValue> {
        self.words.iter().rev().find_map(|w| match_word(w, name))
    }
}

fn match_word(word: &str, name: &str) -> Option<OptionValue> {
    let body = word.strip_prefix("--").or_else(|| word.strip_prefix('-'))?;
    match body.split_once('=') {
        Some((key, value)) if key == name => Some(OptionValue::Text(value.to_string())),
        None if body == name => Some(OptionValue::Boolean(true)),
        _ => None,
    }
}
