// src/error.rs
//! Error taxonomy for the scrape path.
//!
//! Every failure is one of exactly two kinds: the transport broke
//! ([`IoError`]) or the returned markup could not be digested
//! ([`ParseError`]). A failed call never yields a partial result, and nothing
//! here retries; recovery policy belongs to the caller.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Errors raised by [`HtmlHandler`](crate::core::html::HtmlHandler)
/// callbacks; wrapped into [`ParseError::Handler`].
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("i/o error during scrape: {0}")]
    Io(#[from] IoError),

    #[error("error while parsing html: {0}")]
    Parse(#[from] ParseError),
}

/// Network, connection and HTTP-level failures.
#[derive(Debug, Error)]
pub enum IoError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Redirects are never followed; the legacy server answers a dead
    /// session with one, so a 3xx means "not logged in", not "look here".
    #[error("server redirected ({status}) to {location:?}")]
    Redirected {
        status: u16,
        location: Option<String>,
    },

    #[error("unexpected http status {0}")]
    Status(u16),

    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),
}

/// The body was not well-formed markup even after root-wrapping, or the
/// content handler rejected it.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed markup: {0}")]
    Markup(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("markup is not valid utf-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("content handler failed: {0}")]
    Handler(#[source] HandlerError),
}
