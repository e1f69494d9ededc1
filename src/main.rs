//! CLI entry point for the tile map generator

use clap::Parser;
use tilecity::io::cli::{Cli, MapRunner};

fn main() -> tilecity::Result<()> {
    let cli = Cli::parse();
    let mut runner = MapRunner::new(cli);
    runner.install_logger();
    runner.run()?;
    Ok(())
}
