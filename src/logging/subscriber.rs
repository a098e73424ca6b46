//! Tracing subscriber setup for the crate's own diagnostics.
//!
//! Build output goes through [`LogSink`](super::LogSink); this subscriber
//! only renders internal events such as a failed log backup on stderr.
use std::fmt::Write as _;

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
pub(super) struct MessageExtractor {
    pub(super) message: String,
    pub(super) fields: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            write!(self.fields, " {}={value:?}", field.name()).ok();
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            write!(self.fields, " {}={value}", field.name()).ok();
        }
    }
}

/// Render one diagnostic event as a single stderr line.
fn render(level: tracing::Level, message: &str, fields: &str) -> String {
    match level {
        tracing::Level::ERROR => format!("ERROR: {message}{fields}"),
        tracing::Level::WARN => format!("WARNING: {message}"),
        tracing::Level::INFO => format!("{message}{fields}"),
        _ => format!("debug: {message}{fields}"),
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits `WARNING: ...`
/// style lines.
struct DiagnosticFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for DiagnosticFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        writeln!(
            writer,
            "{}",
            render(*event.metadata().level(), &extractor.message, &extractor.fields)
        )
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Diagnostics go to stderr so they never interleave with overwrite-mode
/// lines on stdout. The filter is read from `BUILDLOG_TRACE`, defaulting to
/// `debug` when `verbose` and `warn` otherwise. Must be called once at
/// program startup.
pub fn init_subscriber(verbose: bool) {
    use tracing_subscriber::{
        EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("BUILDLOG_TRACE")
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let console_layer = fmt::layer()
        .event_format(DiagnosticFormatter)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}
