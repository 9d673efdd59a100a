// src/ladder.rs
//! Ladder facade: fetch the 1v1 leaderboard, search it, shape it for export.

use url::form_urlencoded;

use crate::config::ScrapeConfig;
use crate::core::net::ScrapeClient;
use crate::csv::Dataset;
use crate::error::Result;
use crate::specs::ladder::{LadderHandler, Ranked1v1Entry};

/// Column headers for the exported dataset.
pub const HEADERS: [&str; 5] = ["Rank", "Name", "Win %", "Played", "Rating"];

/// Fetch all ladder entries for `rating_type` (e.g. `ladder1v1`).
pub fn fetch(
    client: &ScrapeClient,
    config: &ScrapeConfig,
    rating_type: &str,
) -> Result<Vec<Ranked1v1Entry>> {
    let url = config.ladder_url()?;
    let body: String = form_urlencoded::Serializer::new(s!())
        .append_pair("rating_type", rating_type)
        .finish();
    let entries = client.fetch_and_parse(url.as_str(), &body, LadderHandler::new())?;
    log::info!("ladder: {} entries for {rating_type}", entries.len());
    Ok(entries)
}

/// Find one entry. Numeric queries select by rank; anything else matches the
/// username case-insensitively, preferring a prefix match over a substring
/// match.
pub fn search<'a>(entries: &'a [Ranked1v1Entry], query: &str) -> Option<&'a Ranked1v1Entry> {
    let query = query.trim();
    if let Ok(rank) = query.parse::<u32>() {
        return entries.iter().find(|e| e.rank == rank);
    }
    let lower = query.to_ascii_lowercase();
    entries
        .iter()
        .find(|e| e.username.to_ascii_lowercase().starts_with(&lower))
        .or_else(|| {
            entries
                .iter()
                .find(|e| e.username.to_ascii_lowercase().contains(&lower))
        })
}

/// Shape entries into the canonical export dataset.
pub fn dataset(entries: &[Ranked1v1Entry]) -> Dataset {
    let rows = entries
        .iter()
        .map(|e| {
            vec![
                e.rank.to_string(),
                e.username.clone(),
                format!("{:.1}", e.win_loss_ratio() * 100.0),
                e.games_played.to_string(),
                e.rating.to_string(),
            ]
        })
        .collect();
    Dataset {
        headers: Some(HEADERS.iter().map(|h| s!(*h)).collect()),
        rows,
    }
}
