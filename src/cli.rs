// src/cli.rs

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::eyre;

use crate::config::ScrapeConfig;
use crate::core::net::ScrapeClient;
use crate::csv::{self, Delim};
use crate::{file, ladder};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Format {
    Csv,
    Tsv,
}

impl From<Format> for Delim {
    fn from(f: Format) -> Self {
        match f {
            Format::Csv => Delim::Csv,
            Format::Tsv => Delim::Tsv,
        }
    }
}

/// Scrape the legacy 1v1 ladder and export it.
#[derive(Debug, Parser)]
#[command(name = "ladder_scrape", version, about)]
pub struct Args {
    /// Base URL of the legacy server
    #[arg(long)]
    pub base_url: Option<String>,

    /// Rating type posted to the endpoint
    #[arg(long, default_value = "ladder1v1")]
    pub rating_type: String,

    /// Output format
    #[arg(long, value_enum, default_value = "csv")]
    pub format: Format,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print the single entry matching a rank or player name, then exit
    #[arg(long)]
    pub search: Option<String>,

    /// JSON config file with endpoint overrides
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: Args) -> color_eyre::Result<()> {
    let mut config = match &args.config {
        Some(path) => ScrapeConfig::from_file(path)
            .map_err(|e| eyre!("reading {}: {e}", path.display()))?,
        None => ScrapeConfig::default(),
    };
    if let Some(base) = &args.base_url {
        config.base_url = base.clone();
    }

    let client = ScrapeClient::new(&config)?;
    let entries = ladder::fetch(&client, &config, &args.rating_type)?;

    if let Some(query) = &args.search {
        match ladder::search(&entries, query) {
            Some(e) => {
                println!(
                    "#{} {} | {:.1}% won | {} played | {} rating",
                    e.rank,
                    e.username,
                    e.win_loss_ratio() * 100.0,
                    e.games_played,
                    e.rating,
                );
                return Ok(());
            }
            None => return Err(eyre!("no ladder entry matches {query:?}")),
        }
    }

    let dataset = ladder::dataset(&entries);
    let text = csv::render(&dataset, args.format.into());
    match &args.out {
        Some(path) => {
            file::write_text(path, &text)?;
            eprintln!("Wrote {} rows to {}", dataset.rows.len(), path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
