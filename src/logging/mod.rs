//! Filtered console and log-file output.

mod console;
mod destination;
pub mod format;
mod registry;
mod sink;
mod subscriber;
mod types;
mod utils;

pub use console::Console;
pub use destination::LogFile;
pub use format::{DebugValue, ProjectRoot, TaggedSet};
pub use registry::{LogRegistry, decide_line_width};
pub use sink::{DIVIDER_WIDTH, IndentScope, LogSink};
pub use subscriber::init_subscriber;
pub use types::{ALWAYS, Destination, DividerStyle, LineOpts, LineWidth, OpenMode, SCREEN_SECTION};
