// src/specs/mod.rs
//! Page-specific scraping specs.
//!
//! Each spec encodes where the ground truth lives in one legacy page's HTML
//! and how to read it through a streaming [`HtmlHandler`](crate::core::html::HtmlHandler).
//! Specs only extract; fetching policy, search and export shaping live with
//! the facade (`src/ladder.rs`).

pub mod ladder;
