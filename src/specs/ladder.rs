// src/specs/ladder.rs
//! Scraping spec for the 1v1 ladder page.
//!
//! The endpoint answers a POST with a fragment shaped like:
//!
//! ```text
//! <table class="ladder">
//!   <tr><th>Rank</th><th>Name</th><th>Won</th><th>Played</th><th>Rating</th></tr>
//!   <tr><td>1</td><td><a href="/player/123">Sheeo</a></td><td>120</td><td>160</td><td>2105</td></tr>
//!   ...
//! </table>
//! ```
//!
//! A data row is exactly five `<td>` cells: rank, name, games won, games
//! played, rating. Rows with any other arity (the `<th>` header, spacer and
//! decoration rows) are skipped. Markup nested inside a cell contributes its
//! text only.

use std::str::FromStr;

use crate::core::html::{Attr, HtmlHandler};
use crate::core::sanitize::normalize_ws;
use crate::error::HandlerError;

/// One row of the 1v1 ladder.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked1v1Entry {
    pub rank: u32,
    pub username: String,
    pub won: u32,
    pub games_played: u32,
    pub rating: i32,
}

impl Ranked1v1Entry {
    /// Fraction of played games won; 0.0 for players without games.
    pub fn win_loss_ratio(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.won as f32 / self.games_played as f32
        }
    }
}

/// Streams `<tr>`/`<td>` events into [`Ranked1v1Entry`] rows.
#[derive(Debug, Default)]
pub struct LadderHandler {
    in_cell: bool,
    cell: String,
    cells: Vec<String>,
    entries: Vec<Ranked1v1Entry>,
}

impl LadderHandler {
    pub fn new() -> Self {
        Self::default()
    }

    fn flush_row(&mut self) -> Result<(), HandlerError> {
        let cells = std::mem::take(&mut self.cells);
        if cells.len() != 5 {
            if !cells.is_empty() {
                log::debug!("skipping {}-cell ladder row", cells.len());
            }
            return Ok(());
        }
        self.entries.push(Ranked1v1Entry {
            rank: parse_num(&cells[0], "rank")?,
            username: cells[1].clone(),
            won: parse_num(&cells[2], "won")?,
            games_played: parse_num(&cells[3], "games played")?,
            rating: parse_num(&cells[4], "rating")?,
        });
        Ok(())
    }
}

impl HtmlHandler for LadderHandler {
    type Output = Vec<Ranked1v1Entry>;

    fn start_element(&mut self, name: &str, _attrs: &[Attr]) -> Result<(), HandlerError> {
        if name.eq_ignore_ascii_case("tr") {
            self.cells.clear();
        } else if name.eq_ignore_ascii_case("td") {
            self.in_cell = true;
            self.cell.clear();
        }
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> Result<(), HandlerError> {
        if name.eq_ignore_ascii_case("td") {
            self.in_cell = false;
            let cell = normalize_ws(&self.cell);
            self.cell.clear();
            self.cells.push(cell);
        } else if name.eq_ignore_ascii_case("tr") {
            self.flush_row()?;
        }
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), HandlerError> {
        if self.in_cell {
            self.cell.push_str(text);
        }
        Ok(())
    }

    fn finish(self) -> Result<Self::Output, HandlerError> {
        Ok(self.entries)
    }
}

/// Numeric cell with optional thousands separators.
fn parse_num<T: FromStr>(cell: &str, what: &str) -> Result<T, HandlerError> {
    let cleaned: String = cell.chars().filter(|c| *c != ',').collect();
    cleaned
        .parse()
        .map_err(|_| format!("bad {what} cell: {cell:?}").into())
}
