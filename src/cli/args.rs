use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pizzeria")]
#[command(about = "Runs a pizzeria: a background kitchen produces orders, the front desk consumes them and closes the shop")]
#[command(version)]
pub struct Cli {
    /// Number of pizzas to make before closing
    #[arg(short = 'n', long)]
    pub orders: Option<u64>,

    /// Close the shop early after this many orders have been handled
    #[arg(short, long)]
    pub stop_after: Option<u64>,

    /// How long to wait for the kitchen to acknowledge closing (milliseconds)
    #[arg(long)]
    pub ack_timeout_ms: Option<u64>,

    /// Length of one cooking delay unit (milliseconds); each pizza takes 1-5 units
    #[arg(short, long)]
    pub delay_ms: Option<u64>,

    /// Fixed kitchen outcomes instead of random ones, e.g. "ready,quit,out"
    #[arg(long)]
    pub script: Option<String>,

    /// JSON configuration file; command line flags take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Do not print per-order output
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}
