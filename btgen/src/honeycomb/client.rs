//! Blocking HTTP client for the Honeycomb API.

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use super::{Board, BoardReader, Query, QueryAnnotation};
use crate::Error;

/// Base URL of the public Honeycomb API.
pub const DEFAULT_API_URL: &str = "https://api.honeycomb.io";

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-Honeycomb-Team";

/// Client for the read-only board, query and query annotation endpoints.
///
/// Requests are sent one at a time, without retries, using the transport's
/// default timeouts.
#[derive(Debug, Clone)]
pub struct HoneycombClient {
    base_url: Url,
    http: Client,
}

impl HoneycombClient {
    /// Constructs a client for the public Honeycomb API.
    pub fn new<K: AsRef<str>>(api_key: K) -> Result<Self, Error> {
        Self::with_base_url(api_key, DEFAULT_API_URL)
    }

    /// Constructs a client that talks to the API at the given base URL.
    pub fn with_base_url<K, U>(api_key: K, base_url: U) -> Result<Self, Error>
    where
        K: AsRef<str>,
        U: AsRef<str>,
    {
        let base_url = base_url.as_ref();
        let parsed =
            Url::parse(base_url).map_err(|_| Error::InvalidApiUrl(base_url.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(Error::InvalidApiUrl(base_url.to_string()));
        }

        let mut api_key =
            HeaderValue::from_str(api_key.as_ref()).map_err(|_| Error::InvalidApiKey)?;
        api_key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(Error::HttpClient)?;
        Ok(Self {
            base_url: parsed,
            http,
        })
    }

    /// Builds the URL of an API resource from its path segments, relative to
    /// the `/1/` API version root. Segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidApiUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("1")
            .extend(segments);
        Ok(url)
    }

    fn get<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        id: &str,
        segments: &[&str],
    ) -> Result<T, Error> {
        let url = self.endpoint(segments)?;
        debug!("GET {}", url);
        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|e| Error::Request(url.to_string(), e))?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(resource, id.to_string()));
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        let body = response
            .text()
            .map_err(|e| Error::Request(url.to_string(), e))?;
        serde_json::from_str(&body).map_err(|e| Error::Decode(url.to_string(), e))
    }
}

impl BoardReader for HoneycombClient {
    fn board(&self, board_id: &str) -> Result<Board, Error> {
        self.get("board", board_id, &["boards", board_id])
    }

    fn query(&self, dataset: &str, query_id: &str) -> Result<Query, Error> {
        self.get("query", query_id, &["queries", dataset, query_id])
    }

    fn query_annotation(
        &self,
        dataset: &str,
        annotation_id: &str,
    ) -> Result<QueryAnnotation, Error> {
        self.get(
            "query annotation",
            annotation_id,
            &["query_annotations", dataset, annotation_id],
        )
    }
}

#[cfg(test)]
mod test {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    use super::*;

    /// Answers a single HTTP request with the given status line and body,
    /// handing back the raw request text once the response is sent.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        (base_url, handle)
    }

    #[test]
    fn sends_api_key_and_decodes_board() {
        let (base_url, server) = serve_once("200 OK", r#"{"id":"b1","name":"Service Health"}"#);
        let client = HoneycombClient::with_base_url("secret-key", &base_url).unwrap();
        let board = client.board("b1").unwrap();
        assert_eq!(board.name, "Service Health");

        let request = server.join().unwrap();
        assert!(request.starts_with("GET /1/boards/b1 HTTP/1.1\r\n"), "{}", request);
        assert!(
            request
                .to_ascii_lowercase()
                .contains("x-honeycomb-team: secret-key\r\n"),
            "{}",
            request
        );
    }

    #[test]
    fn not_found_names_the_resource() {
        let (base_url, server) = serve_once("404 Not Found", r#"{"error":"not found"}"#);
        let client = HoneycombClient::with_base_url("key", &base_url).unwrap();
        let err = client.query("prod", "q").unwrap_err();
        assert!(
            matches!(err, Error::NotFound("query", ref id) if id == "q"),
            "{:?}",
            err
        );
        server.join().unwrap();
    }

    #[test]
    fn other_failures_carry_status_and_body() {
        let (base_url, server) = serve_once("500 Internal Server Error", "boom");
        let client = HoneycombClient::with_base_url("key", &base_url).unwrap();
        let err = client.query_annotation("prod", "a1").unwrap_err();
        match err {
            Error::Status { url, status, body } => {
                assert_eq!(url, format!("{}/1/query_annotations/prod/a1", base_url));
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        server.join().unwrap();
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let (base_url, server) = serve_once("200 OK", "<html>not json</html>");
        let client = HoneycombClient::with_base_url("key", &base_url).unwrap();
        let err = client.board("b1").unwrap_err();
        assert!(matches!(err, Error::Decode(..)), "{:?}", err);
        server.join().unwrap();
    }

    #[test]
    fn endpoints_are_rooted_at_api_version() {
        let client = HoneycombClient::new("key").unwrap();
        let url = client.endpoint(&["boards", "2mYb8uLtYZQ"]).unwrap();
        assert_eq!(url.as_str(), "https://api.honeycomb.io/1/boards/2mYb8uLtYZQ");
        let url = client
            .endpoint(&["query_annotations", "production", "a1"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.honeycomb.io/1/query_annotations/production/a1"
        );
    }

    #[test]
    fn custom_base_url_with_trailing_slash() {
        let client = HoneycombClient::with_base_url("key", "https://api.eu1.honeycomb.io/").unwrap();
        let url = client.endpoint(&["queries", "prod", "q1"]).unwrap();
        assert_eq!(url.as_str(), "https://api.eu1.honeycomb.io/1/queries/prod/q1");
    }

    #[test]
    fn path_segments_are_encoded() {
        let client = HoneycombClient::new("key").unwrap();
        let url = client.endpoint(&["queries", "my dataset", "a/b"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.honeycomb.io/1/queries/my%20dataset/a%2Fb"
        );
    }

    #[test]
    fn rejects_invalid_configuration() {
        assert!(matches!(
            HoneycombClient::with_base_url("key", "not a url"),
            Err(Error::InvalidApiUrl(_))
        ));
        assert!(matches!(
            HoneycombClient::new("bad\nkey"),
            Err(Error::InvalidApiKey)
        ));
    }
}
