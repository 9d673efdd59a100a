// src/core/net.rs
//! Blocking HTTP front end for the legacy "HTML API" endpoints.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, LOCATION};
use reqwest::redirect::Policy;

use crate::config::ScrapeConfig;
use crate::core::html::{self, HtmlHandler};
use crate::core::ui_thread;
use crate::error::{IoError, Result};

/// One call, one POST, one parsed result. Stateless between calls.
///
/// Redirects are not followed: the server answers a dead session with a
/// redirect, and silently following it would hand the parser a login page.
pub struct ScrapeClient {
    http: Client,
}

impl ScrapeClient {
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let http = Client::builder()
            .redirect(Policy::none())
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(IoError::from)?;
        Ok(Self { http })
    }

    /// POST an already URL-encoded form body, return the raw response bytes.
    ///
    /// Blocks for the full round trip. Never call this from a thread
    /// reserved with [`ui_thread::reserve_current`]; the guard fails fast
    /// before any I/O happens.
    pub fn post_form(&self, url: &str, form_body: &str) -> Result<Vec<u8>> {
        ui_thread::assert_background();

        log::debug!("POST {url} ({} form bytes)", form_body.len());
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(CACHE_CONTROL, "no-cache")
            .body(form_body.to_owned())
            .send()
            .map_err(IoError::from)?;

        let status = response.status();
        if status.is_redirection() {
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            log::warn!("{url} redirected ({status}) to {location:?}");
            return Err(IoError::Redirected {
                status: status.as_u16(),
                location,
            }
            .into());
        }
        if !status.is_success() {
            return Err(IoError::Status(status.as_u16()).into());
        }

        let body = response.bytes().map_err(IoError::from)?;
        Ok(body.to_vec())
    }

    /// Fetch the fragment at `url` and stream it into `handler`.
    pub fn fetch_and_parse<H: HtmlHandler>(
        &self,
        url: &str,
        form_body: &str,
        handler: H,
    ) -> Result<H::Output> {
        let body = self.post_form(url, form_body)?;
        html::parse_wrapped(&body, handler)
    }
}
