//! Image info command.
//!
//! Prints dimensions and the per-channel histogram maxima of each input.

use crate::InfoArgs;
use anyhow::Result;
use tonekit_ops::{Channel, HistogramCounts, SessionConfig};

/// Runs the info command.
pub fn run(args: InfoArgs, _config: &SessionConfig, verbose: bool) -> Result<()> {
    for path in &args.input {
        let image = super::load_image(path)?;
        let counts = HistogramCounts::compute(&image);

        println!("{}", path.display());
        println!("  Resolution: {}x{}", image.width(), image.height());
        println!("  Pixels:     {}", image.pixel_count());
        println!(
            "  Hist max:   R {}  G {}  B {}  (global {})",
            counts.max(Channel::Red),
            counts.max(Channel::Green),
            counts.max(Channel::Blue),
            counts.global_max()
        );

        if verbose {
            for channel in Channel::ALL {
                let bins = counts.channel(channel);
                let lo = bins.iter().position(|&c| c > 0).unwrap_or(0);
                let hi = bins.iter().rposition(|&c| c > 0).unwrap_or(0);
                println!("  {:?} range: {}..={}", channel, lo, hi);
            }
        }

        if args.input.len() > 1 {
            println!();
        }
    }

    Ok(())
}
