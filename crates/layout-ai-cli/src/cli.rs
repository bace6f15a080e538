use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "layout-ai",
    about = "Recover level layouts from model output and repair them for a game type",
    version
)]
pub struct Cli {
    /// Application config file (defaults to $LAYOUT_AI_CONFIG, then the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recover a layout document from raw model output
    Recover {
        /// File holding the raw output (`-` or omitted for stdin)
        input: Option<PathBuf>,

        /// Print the recovery stage alongside the layout
        #[arg(long)]
        json: bool,
    },

    /// Recover a layout and finalize it for a game type profile
    Repair {
        input: Option<PathBuf>,

        #[command(flatten)]
        profile: ProfileArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Check a layout against a game type profile
    Validate {
        input: Option<PathBuf>,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Finalize the layout before validating it
        #[arg(long)]
        finalize: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the system and user messages for a request
    Prompt {
        /// What the level should look like
        request: String,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Request a layout from the configured source, then recover, finalize and validate it
    Generate {
        request: String,

        #[command(flatten)]
        profile: ProfileArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
pub struct ProfileArgs {
    /// Game type profile (TOML); falls back to `default_profile` from the config
    #[arg(long)]
    pub profile: Option<PathBuf>,
}

#[derive(Args)]
pub struct OutputArgs {
    /// Convert grid cells to world positions in the printed layout
    #[arg(long)]
    pub world_coords: bool,

    /// Print repair details alongside the layout
    #[arg(long)]
    pub json: bool,
}
