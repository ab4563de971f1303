//! CLI entry point for seeded dungeon generation

use clap::Parser;
use dungrow::io::cli::{BatchRunner, Cli};

fn main() -> dungrow::Result<()> {
    let cli = Cli::parse();
    let mut runner = BatchRunner::new(cli);
    runner.run()
}
