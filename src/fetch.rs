//! Single blocking HTTP GET.
//!
//! Only status 200 counts as success. There are no retries.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use thiserror::Error;
use url::Url;

use crate::config::FetchConfig;

/// Printed on stdout when the server answers with anything but 200.
pub const FAILURE_MESSAGE: &str = "Failed to retrieve the file";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL `{url}`")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme `{0}` (expected http or https)")]
    Scheme(String),

    #[error("server responded with {0}")]
    Status(StatusCode),

    #[error("request to `{url}` failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Whether a response arrived but was not 200.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status(_))
    }
}

/// Parse and check an http(s) URL.
pub fn parse_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::Scheme(other.to_string())),
    }
}

/// GET `config.url` and return the body as text.
pub fn fetch_text(config: &FetchConfig) -> Result<String, FetchError> {
    let url = parse_url(&config.url)?;
    let network = |source| FetchError::Network {
        url: url.to_string(),
        source,
    };

    let client = build_client(config).map_err(network)?;
    let response = client.get(url.clone()).send().map_err(network)?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::Status(status));
    }
    response.text().map_err(network)
}

fn build_client(config: &FetchConfig) -> reqwest::Result<Client> {
    let mut builder = Client::builder();
    if let Some(secs) = config.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if !config.system_proxy {
        builder = builder.no_proxy();
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;

    /// Serve one request on a random local port.
    fn serve_once(status: u16, body: &'static str) -> (String, thread::JoinHandle<()>) {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let handle = thread::spawn(move || {
            if let Ok(request) = server.recv() {
                let response = tiny_http::Response::from_string(body).with_status_code(status);
                let _ = request.respond(response);
            }
        });
        (format!("http://{addr}/app.js"), handle)
    }

    fn local(url: String) -> FetchConfig {
        FetchConfig {
            url,
            timeout: Some(10),
            system_proxy: false,
        }
    }

    #[test]
    fn test_fetch_ok_returns_body() {
        let (url, handle) = serve_once(200, "console.log('hi');");
        let body = fetch_text(&local(url)).unwrap();
        assert_eq!(body, "console.log('hi');");
        handle.join().unwrap();
    }

    #[test]
    fn test_fetch_non_200_is_status_error() {
        for status in [404, 500, 201] {
            let (url, handle) = serve_once(status, "nope");
            let err = fetch_text(&local(url)).unwrap_err();
            assert!(err.is_status(), "failed for {status}: {err}");
            match err {
                FetchError::Status(code) => assert_eq!(code.as_u16(), status),
                other => panic!("unexpected error: {other}"),
            }
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_fetch_connection_refused_is_network_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let err = fetch_text(&local(format!("http://127.0.0.1:{port}/"))).unwrap_err();
        assert!(matches!(err, FetchError::Network { .. }), "{err}");
        assert!(!err.is_status());
    }

    #[test]
    fn test_parse_url() {
        assert!(parse_url("https://example.com/app.js").is_ok());
        assert!(matches!(
            parse_url("my-website.com"),
            Err(FetchError::InvalidUrl { .. })
        ));
        assert!(matches!(
            parse_url("ftp://example.com/file"),
            Err(FetchError::Scheme(scheme)) if scheme == "ftp"
        ));
    }
}
