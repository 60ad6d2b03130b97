use std::path::PathBuf;

use clap::Parser;

/// Startup configuration. Every option can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "superstore-dashboard", version, about = "Super Store sales dashboard")]
pub struct Config {
    /// Sales dataset to load (.csv, .tsv or .parquet)
    #[arg(short, long, env = "SUPERSTORE_DATA", default_value = "data/superSales.csv")]
    pub data: PathBuf,

    /// Month of year (1-12) charted as daily quantity sold
    #[arg(
        short,
        long,
        env = "SUPERSTORE_MONTH",
        default_value_t = 3,
        value_parser = clap::value_parser!(u32).range(1..=12)
    )]
    pub month: u32,

    /// Print the dashboard as JSON and exit instead of opening a window
    #[arg(long)]
    pub print: bool,

    /// Product line to print (all lines when omitted)
    #[arg(long, requires = "print")]
    pub line: Option<String>,
}
