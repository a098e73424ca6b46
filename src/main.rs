//! `buildlog`: pipe build output through a filtered console and log file.
use std::io::{self, BufRead as _, Write as _};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use buildlog::cli::Cli;
use buildlog::config::{ArgList, LogOptions, load_stored};
use buildlog::logging::{self, Console, LineOpts, LogRegistry, LogSink};
use clap::Parser;

fn main() -> Result<()> {
    let args = Cli::parse();
    logging::init_subscriber(args.verbose);

    let stored = load_stored(&args.config)?;
    let overrides = ArgList::new(args.overrides.iter().cloned());
    let options = LogOptions::resolve(&[&overrides, &stored])?;

    if args.show_config {
        let rendered = options.to_toml().context("rendering options as TOML")?;
        io::stdout()
            .write_all(rendered.as_bytes())
            .context("writing options")?;
        return Ok(());
    }

    let registry = Arc::new(LogRegistry::new());
    let sink = LogSink::setup(registry, &options, Some(Console::stdout()))?;
    let opts = LineOpts::level(args.level)
        .with_section(args.section.as_deref())
        .with_rank(args.rank);

    if let Some(banner) = &args.banner {
        sink.print_box(banner, args.level, None);
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("reading standard input")?;
        sink.print_line(&line, opts);
    }
    Ok(())
}
