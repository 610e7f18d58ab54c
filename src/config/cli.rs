use crate::config::LogFormat;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:50051";

#[derive(Debug, Clone, Parser)]
#[command(name = "sorting-robot")]
#[command(
    about = "In-memory sorting robot: load items, select one at random, move it into a cubby"
)]
pub struct CliConfig {
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the robot's HTTP server
    Serve {
        /// Path to TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long)]
        listen: Option<SocketAddr>,

        /// Capacity of cubbies created on first use
        #[arg(long)]
        capacity: Option<usize>,

        /// Seed for reproducible selections
        #[arg(long)]
        seed: Option<u64>,
    },
    #[command(flatten)]
    Client(ClientCommand),
}

/// Commands sent to a running server.
#[derive(Debug, Clone, Subcommand)]
pub enum ClientCommand {
    /// Load items into the cargo
    Load {
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server: String,

        #[arg(required = true)]
        codes: Vec<String>,
    },
    /// Select a random item from the cargo
    Select {
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server: String,
    },
    /// Move the selected item into a cubby
    Move {
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server: String,

        cubby: String,
    },
    /// Create a cubby with an explicit capacity
    Cubby {
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server: String,

        id: String,

        capacity: usize,
    },
    /// Print the robot's current state as JSON
    State {
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server: String,
    },
}
