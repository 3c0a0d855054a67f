//! Histogram command.
//!
//! Prints `k r g b` per bin, where r, g and b are normalized bar heights.

use crate::HistogramArgs;
use anyhow::Result;
use tonekit_ops::{HistogramEngine, SessionConfig};

/// Runs the histogram command.
pub fn run(args: HistogramArgs, config: &SessionConfig, verbose: bool) -> Result<()> {
    let overridden = SessionConfig {
        histogram_height: args.height.unwrap_or(config.histogram_height),
        histogram_headroom: args.headroom.unwrap_or(config.histogram_headroom),
        ..config.clone()
    };
    overridden.validate()?;

    let image = super::load_image(&args.input)?;
    let engine = HistogramEngine::from_config(&overridden);
    let histogram = engine.compute(&image);

    if verbose {
        println!(
            "# {} {}x{} bar height {}",
            args.input.display(),
            image.width(),
            image.height(),
            engine.bar_height()
        );
    }

    let bars = &histogram.bars;
    for k in 0..bars.red.len() {
        println!("{} {} {} {}", k, bars.red[k], bars.green[k], bars.blue[k]);
    }

    Ok(())
}
