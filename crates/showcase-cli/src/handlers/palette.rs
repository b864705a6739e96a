//! Palette command handler

use crate::config::CliConfig;
use crate::output::Reporter;
use crate::PaletteArgs;
use showcase_animations::core::{ColorPalette, Seed, Xorshift64};

/// `draws` random palette colors from a generator seeded with `seed`.
/// The page draws the same sequence for the same seed.
#[must_use]
pub fn palette_draws(seed: u64, draws: usize) -> Vec<&'static str> {
    let palette = ColorPalette::standard();
    let mut rng = Xorshift64::new(Seed::from_u64(seed));
    (0..draws).map(|_| palette.pick(&mut rng)).collect()
}

/// Execute the palette command
pub fn execute_palette(config: &CliConfig, reporter: &Reporter, args: &PaletteArgs) {
    let palette = ColorPalette::standard();
    reporter.header("Palette");
    for (index, color) in palette.colors().iter().enumerate() {
        reporter.line(&format!("  {index} {color}"));
    }

    let seed = args.seed.unwrap_or(config.settings.seed);
    reporter.header(&format!("Draws (seed {seed})"));
    reporter.raw(&palette_draws(seed, args.draws).join(" "));
}
