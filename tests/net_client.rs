// tests/net_client.rs
//
// ScrapeClient behavior against canned local HTTP responses. Each helper
// server answers exactly one connection and exits; no outside network.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use ladder_scrape::config::ScrapeConfig;
use ladder_scrape::core::html::{self, Attr, HtmlHandler};
use ladder_scrape::core::net::ScrapeClient;
use ladder_scrape::error::{IoError, ScrapeError};

/// Records every element name it sees, in document order.
#[derive(Default)]
struct NameRecorder {
    names: Vec<String>,
}

impl HtmlHandler for NameRecorder {
    type Output = Vec<String>;

    fn start_element(
        &mut self,
        name: &str,
        _attrs: &[Attr],
    ) -> Result<(), ladder_scrape::error::HandlerError> {
        self.names.push(name.to_string());
        Ok(())
    }

    fn finish(self) -> Result<Self::Output, ladder_scrape::error::HandlerError> {
        Ok(self.names)
    }
}

/// Serve one connection with a canned HTTP response, return the URL to hit.
fn serve_once(status_line: &'static str, extra_headers: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            drain_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n{extra_headers}\r\n{body}",
                body.len(),
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{addr}/ladder.php")
}

/// Read the whole request (headers plus declared body) so the close-on-drop
/// later cannot reset the connection under the client.
fn drain_request(stream: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 1024];
    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        match stream.read(&mut tmp) {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&tmp[..n]),
        }
    };
    let body_len = content_length(&String::from_utf8_lossy(&buf[..header_end]));
    while buf.len() < header_end + body_len {
        match stream.read(&mut tmp) {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&tmp[..n]),
        }
    }
}

fn content_length(headers: &str) -> usize {
    headers
        .lines()
        .filter_map(|l| l.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse().ok())
        .unwrap_or(0)
}

/// An address nothing listens on.
fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}/ladder.php")
}

fn client() -> ScrapeClient {
    ScrapeClient::new(&ScrapeConfig::default()).expect("client")
}

#[test]
fn parses_a_successful_response() {
    let url = serve_once("200 OK", "", "<b>x</b><i>y</i>");
    let names = client()
        .fetch_and_parse(&url, "rating_type=ladder1v1", NameRecorder::default())
        .expect("fetch");
    assert_eq!(names, ["root", "b", "i"]);
}

#[test]
fn network_and_string_paths_agree() {
    let body = "<table><tr><td>1</td></tr></table>";
    let url = serve_once("200 OK", "", body);
    let over_network = client()
        .fetch_and_parse(&url, "rating_type=ladder1v1", NameRecorder::default())
        .expect("network path");
    let from_string =
        html::parse_fragment(body, NameRecorder::default()).expect("string path");
    assert_eq!(over_network, from_string);
}

#[test]
fn redirect_surfaces_as_io_error() {
    let url = serve_once(
        "302 Found",
        "Location: http://127.0.0.1:1/login.php\r\n",
        "",
    );
    let err = client()
        .fetch_and_parse(&url, "rating_type=ladder1v1", NameRecorder::default())
        .expect_err("redirect must not be followed");
    match err {
        ScrapeError::Io(IoError::Redirected { status, location }) => {
            assert_eq!(status, 302);
            assert_eq!(location.as_deref(), Some("http://127.0.0.1:1/login.php"));
        }
        other => panic!("expected redirect io error, got {other:?}"),
    }
}

#[test]
fn server_error_surfaces_as_io_error() {
    let url = serve_once("500 Internal Server Error", "", "");
    let err = client()
        .post_form(&url, "rating_type=ladder1v1")
        .expect_err("500 is not a success");
    assert!(matches!(err, ScrapeError::Io(IoError::Status(500))), "got {err:?}");
}

#[test]
fn connection_failure_surfaces_as_io_error() {
    let err = client()
        .post_form(&refused_url(), "rating_type=ladder1v1")
        .expect_err("nothing listens there");
    assert!(matches!(err, ScrapeError::Io(_)), "got {err:?}");
}

#[test]
fn malformed_body_surfaces_as_parse_error() {
    let url = serve_once("200 OK", "", "<table><tr></table>");
    let err = client()
        .fetch_and_parse(&url, "rating_type=ladder1v1", NameRecorder::default())
        .expect_err("mismatched end tag");
    assert!(matches!(err, ScrapeError::Parse(_)), "got {err:?}");
}
