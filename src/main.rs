//! # chatview CLI
//!
//! Command-line interface for the chatview library.

use std::io;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatview::ChatviewError;
use chatview::cli::Args;
use chatview::filter::apply_filters;
use chatview::render::{write_text, write_text_file};
use chatview::timeline::Timeline;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<(), ChatviewError> {
    let start = Instant::now();
    let args = <Args as ClapParser>::parse();

    let view_config = args.view_config()?;
    let filter_config = args.filter_config()?;

    if !args.quiet {
        eprintln!("💬 chatview v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        eprintln!("📂 Input:   {}", args.input.display());
        if let Some(ref output) = args.output {
            eprintln!("💾 Output:  {}", output.display());
        }
        eprintln!("🕒 Zone:    {}", view_config.time_zone);
        if let Some(ref after) = args.after {
            eprintln!("📅 After:   {}", after);
        }
        if let Some(ref before) = args.before {
            eprintln!("📅 Before:  {}", before);
        }
        if let Some(ref from) = args.from {
            eprintln!("👤 From:    {}", from);
        }
        eprintln!();
    }

    let mut timeline = Timeline::new(view_config);
    let stats = timeline.load_path(&args.input)?;
    let shown = apply_filters(timeline.fragments().to_vec(), &filter_config);

    match args.output {
        Some(ref path) => write_text_file(&shown, path)?,
        None => write_text(&shown, &mut io::stdout().lock())?,
    }

    if !args.quiet {
        eprintln!("📊 Summary:");
        eprintln!("   Records:   {}", stats.total);
        eprintln!("   Legacy:    {}", stats.legacy);
        eprintln!("   V2:        {}", stats.v2);
        if stats.skipped() > 0 {
            eprintln!(
                "   Skipped:   {} ({} unknown, {} malformed)",
                stats.skipped(),
                stats.unknown,
                stats.invalid
            );
        }
        if filter_config.is_active() {
            eprintln!("   Shown:     {}", shown.len());
        }
        eprintln!("   Time:      {:.2}s", start.elapsed().as_secs_f64());
    }

    Ok(())
}
