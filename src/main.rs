// src/main.rs

use clap::Parser;

use ladder_scrape::cli::{self, Args};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    cli::run(Args::parse())
}
