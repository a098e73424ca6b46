//! Logging options and the sources they are resolved from.
pub mod options;
pub mod source;

pub use options::{DEBUG_LEVEL_LIMIT, LogOptions};
pub use source::{ArgList, OptionSource, OptionValue, load_stored};
