//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use showcase_animations::dom::ids::ANIMATED_BOX;
use showcase_animations::engine::OverlapPolicy;
use std::path::PathBuf;

/// Showcase: drive the animation page in virtual time
#[derive(Parser, Debug)]
#[command(name = "showcase")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Stage configuration file (.yaml, .yml or .json)
    #[arg(long, global = true, env = "SHOWCASE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one configured animation and trace every timer firing
    Simulate(SimulateArgs),

    /// Click an element and run the resulting timers
    Click(ClickArgs),

    /// Print a counter sequence
    Counter(CounterArgs),

    /// List the palette and a run of random draws
    Palette(PaletteArgs),

    /// Show the effective stage configuration
    Config(ConfigArgs),
}

/// Arguments for the simulate command
#[derive(Parser, Debug)]
pub struct SimulateArgs {
    /// Target element id
    #[arg(short, long, default_value = ANIMATED_BOX)]
    pub element: String,

    /// Effect tag (shake, glow, rainbow, bounce, spin, pulse or any other)
    #[arg(short = 't', long = "effect", default_value = "bounce")]
    pub effect: String,

    /// Time until reversal in milliseconds [default: configured default duration]
    #[arg(short, long)]
    pub duration: Option<u64>,

    /// Issue the request once more after it completes
    #[arg(short, long)]
    pub repeat: bool,

    /// Overlap policy override
    #[arg(long)]
    pub policy: Option<PolicyArg>,

    /// Seed override
    #[arg(long)]
    pub seed: Option<u64>,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the click command
#[derive(Parser, Debug)]
pub struct ClickArgs {
    /// Element id to click
    pub element: String,

    /// Stop at this virtual time instead of running until idle
    #[arg(long)]
    pub until: Option<u64>,

    /// Seed override
    #[arg(long)]
    pub seed: Option<u64>,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the counter command
#[derive(Parser, Debug)]
pub struct CounterArgs {
    /// Starting value; the first advance yields one more
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub initial: i64,

    /// Number of advances
    #[arg(short = 'n', long, default_value = "3")]
    pub times: usize,
}

/// Arguments for the palette command
#[derive(Parser, Debug)]
pub struct PaletteArgs {
    /// Number of random draws
    #[arg(short = 'n', long, default_value = "5")]
    pub draws: usize,

    /// Seed override
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Emit JSON instead of YAML
    #[arg(long)]
    pub json: bool,
}

/// Overlap policy argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyArg {
    /// Every reversal fires on its own schedule
    Independent,
    /// A new request restores and replaces the armed one
    CancelPrevious,
}

impl From<PolicyArg> for OverlapPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Independent => Self::Independent,
            PolicyArg::CancelPrevious => Self::CancelPrevious,
        }
    }
}

/// Color argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
