// src/core/html.rs
//! Root-wrapping adapter around a streaming markup parser.
//!
//! The legacy server answers with HTML *fragments*: sibling elements with no
//! single root, which a streaming XML parser refuses outright. Every body is
//! therefore parsed as `<root>` + body + `</root>`, and the resulting event
//! stream is forwarded to a caller-supplied [`HtmlHandler`]. The synthetic
//! `root` element is delivered to the handler like any other element, so
//! handlers should expect it.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::core::sanitize::decode_entities;
use crate::error::{HandlerError, ParseError, Result};

/// Synthetic wrapper markers, prepended/appended to every body.
pub const ROOT_OPEN: &[u8] = b"<root>";
pub const ROOT_CLOSE: &[u8] = b"</root>";

/// One element attribute, entity-decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

/// Case-insensitive attribute lookup; the legacy pages mix cases freely.
pub fn attr<'a>(attrs: &'a [Attr], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|a| a.name.eq_ignore_ascii_case(name))
        .map(|a| a.value.as_str())
}

/// Streaming content handler: consumes parser events, accumulates a typed
/// result. Event callbacks default to no-ops so a handler implements only
/// what it needs.
pub trait HtmlHandler {
    type Output;

    fn start_element(&mut self, _name: &str, _attrs: &[Attr]) -> std::result::Result<(), HandlerError> {
        Ok(())
    }

    fn end_element(&mut self, _name: &str) -> std::result::Result<(), HandlerError> {
        Ok(())
    }

    fn text(&mut self, _text: &str) -> std::result::Result<(), HandlerError> {
        Ok(())
    }

    /// Called once after the wrapped fragment parsed cleanly.
    fn finish(self) -> std::result::Result<Self::Output, HandlerError>;
}

/// Parse a raw HTML string without any network round trip.
///
/// The string is narrowed to ASCII first: any non-ASCII character becomes
/// `?`. The legacy endpoints only ever emit ASCII-safe content, and callers
/// using this path must pre-encode anything else themselves; widening the
/// encoding here would change observable bytes on the network path's twin.
pub fn parse_fragment<H: HtmlHandler>(html: &str, handler: H) -> Result<H::Output> {
    parse_wrapped(&ascii_bytes(html), handler)
}

/// Wrap `body` in the synthetic root and pump parser events into `handler`.
pub fn parse_wrapped<H: HtmlHandler>(body: &[u8], handler: H) -> Result<H::Output> {
    let mut wrapped = Vec::with_capacity(ROOT_OPEN.len() + body.len() + ROOT_CLOSE.len());
    wrapped.extend_from_slice(ROOT_OPEN);
    wrapped.extend_from_slice(body);
    wrapped.extend_from_slice(ROOT_CLOSE);
    run_events(&wrapped, handler)
}

fn run_events<H: HtmlHandler>(doc: &[u8], mut handler: H) -> Result<H::Output> {
    let mut reader = Reader::from_reader(doc);
    reader.check_end_names(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf).map_err(ParseError::Markup)? {
            Event::Start(e) => {
                let name = utf8(e.name().as_ref())?.to_string();
                let attrs = collect_attrs(&e)?;
                handler
                    .start_element(&name, &attrs)
                    .map_err(ParseError::Handler)?;
            }
            Event::End(e) => {
                let name = utf8(e.name().as_ref())?.to_string();
                handler.end_element(&name).map_err(ParseError::Handler)?;
            }
            // Void elements (<br/>) become a start/end pair, as SAX reports them.
            Event::Empty(e) => {
                let name = utf8(e.name().as_ref())?.to_string();
                let attrs = collect_attrs(&e)?;
                handler
                    .start_element(&name, &attrs)
                    .map_err(ParseError::Handler)?;
                handler.end_element(&name).map_err(ParseError::Handler)?;
            }
            Event::Text(t) => {
                let bytes = t.into_inner();
                let text = decode_entities(utf8(&bytes)?);
                handler.text(&text).map_err(ParseError::Handler)?;
            }
            // CDATA passes through verbatim, no entity decoding.
            Event::CData(t) => {
                let bytes = t.into_inner();
                handler.text(utf8(&bytes)?).map_err(ParseError::Handler)?;
            }
            // No data in these for scraping purposes.
            Event::Decl(_) | Event::DocType(_) | Event::Comment(_) | Event::PI(_) => {}
            Event::Eof => break,
        }
        buf.clear();
    }

    Ok(handler.finish().map_err(ParseError::Handler)?)
}

fn collect_attrs(e: &BytesStart) -> std::result::Result<Vec<Attr>, ParseError> {
    let mut out = Vec::new();
    // html_attributes tolerates the unquoted values legacy markup is fond of
    for a in e.html_attributes() {
        let a = a.map_err(ParseError::Attr)?;
        out.push(Attr {
            name: utf8(a.key.as_ref())?.to_string(),
            value: decode_entities(utf8(&a.value)?),
        });
    }
    Ok(out)
}

fn utf8(bytes: &[u8]) -> std::result::Result<&str, ParseError> {
    std::str::from_utf8(bytes).map_err(ParseError::Encoding)
}

/// Narrow to ASCII the way the legacy pipeline always has: anything outside
/// the ASCII range becomes `?`.
fn ascii_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect()
}
