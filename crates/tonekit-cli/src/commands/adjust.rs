//! Adjust command.
//!
//! Opens an editing session on the input, applies each `--op` in order and
//! writes the live buffer. History timestamps are printed as raw UNIX-epoch
//! seconds.

use crate::AdjustArgs;
use anyhow::{Context, Result};
use std::time::UNIX_EPOCH;
use tonekit_ops::{Adjustment, EditSession, HistorySummary, SessionConfig};
use tracing::info;

/// Runs the adjust command.
pub fn run(args: AdjustArgs, config: &SessionConfig, verbose: bool) -> Result<()> {
    // Parse everything up front so a typo fails before any work is done.
    let adjustments = args
        .ops
        .iter()
        .map(|op| op.parse::<Adjustment>())
        .collect::<Result<Vec<_>, _>>()?;

    let image = super::load_image(&args.input)?;
    if verbose {
        println!(
            "Loaded {} ({}x{})",
            args.input.display(),
            image.width(),
            image.height()
        );
    }

    let mut session = EditSession::open(image, config)?;
    for (i, adjustment) in adjustments.into_iter().enumerate() {
        session
            .apply(adjustment)
            .with_context(|| format!("Adjustment #{} ({}) failed", i + 1, args.ops[i]))?;
        info!(op = %args.ops[i], "Applied");
    }

    super::save_image(&args.output, session.buffer())?;
    if verbose {
        println!("Wrote {}", args.output.display());
    }

    if args.history {
        for (i, entry) in session.history_entries().iter().enumerate() {
            println!("{:>3}  {}", i, format_entry(entry));
        }
    }

    Ok(())
}

fn format_entry(entry: &HistorySummary) -> String {
    match entry.timestamp.duration_since(UNIX_EPOCH) {
        Ok(since) => format!("{:<16} {}.{:03}", entry.title, since.as_secs(), since.subsec_millis()),
        Err(_) => format!("{:<16} -", entry.title),
    }
}
