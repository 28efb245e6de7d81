use clap::{Parser, Subcommand};

pub const DEMO_DATE: &str = "20180120";

/// Request batches replayed by the `demo` subcommand, in order.
pub const DEMO_BATCHES: [[&str; 3]; 3] = [
    ["ABC-0000-123", "ABC-0000-345", "ABC-0000-567"],
    ["ABC-0000-345", "XYZ-0000-123", "XYZ-0000-345"],
    ["XYZ-0000-345", "ABC-0000-567", "XYZ-0000-567"],
];

#[derive(Parser)]
#[command(name = "bond-cache")]
#[command(about = "Client-side cache for per-date bond data lookups")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON configuration file; the built-in mock transport is used when omitted
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay three overlapping requests and show how the cache fills up
    Demo,

    /// Fetch bond data for the given ISINs and print it as JSON
    Get {
        /// Quote date, e.g. 20180120
        #[arg(short, long)]
        date: String,

        /// ISINs to look up
        #[arg(required = true)]
        isins: Vec<String>,
    },
}
