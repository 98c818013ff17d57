use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// mc-console: drive a Minecraft server through its remote console
#[derive(Parser)]
#[command(name = "mc-console")]
#[command(about = "Run administrative commands on a Minecraft server over RCON")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging (debug level, mirrored to stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Custom configuration directory
    #[arg(short, long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show who is online
    Players,

    /// Disconnect a player
    Kick {
        name: String,

        /// Reason shown to the player
        reason: Vec<String>,
    },

    /// Inspect or edit the whitelist
    Whitelist {
        #[command(subcommand)]
        action: WhitelistCommand,
    },

    /// Query or change the world clock
    Time {
        #[command(subcommand)]
        action: TimeCommand,
    },

    /// Show the difficulty, or change it when a level is given
    Difficulty {
        /// peaceful, easy, normal or hard
        level: Option<String>,
    },

    /// Show day, day phase and difficulty
    Stats,

    /// Change the weather
    Weather {
        /// clear, rain or thunder
        kind: String,

        /// Duration in seconds
        duration: Option<u32>,
    },

    /// Broadcast a chat message
    Say {
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Save the world to disk
    Save,

    /// Send any command verbatim
    Exec {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum WhitelistCommand {
    /// List whitelisted players
    List,

    /// Whitelist a player
    Add { name: String },

    /// Remove a player from the whitelist
    Remove { name: String },
}

#[derive(Subcommand)]
pub enum TimeCommand {
    /// Read one of the server clocks
    Query {
        #[arg(value_enum)]
        clock: Clock,
    },

    /// Jump to a day phase (day, noon, night, midnight) or a tick of the day
    Set { value: String },

    /// Advance the clock
    Add { ticks: u64 },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Clock {
    Daytime,
    Gametime,
    Day,
}
