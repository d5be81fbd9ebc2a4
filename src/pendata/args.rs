use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pendata")]
#[command(about = "Terminal student record manager", long_about = None)]
pub struct Cli {
    /// Data file to load before the menu starts
    pub file: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
