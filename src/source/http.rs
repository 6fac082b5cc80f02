//! HTTP data source (blocking reqwest client).

use std::time::Duration;

use chrono::{DateTime, Local};
use reqwest::blocking::Client;
use reqwest::header::LAST_MODIFIED;
use reqwest::{StatusCode, Url};

use super::{DataSource, Fetched, LoadError};

/// Fetches files relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base: Url,
    client: Client,
}

impl HttpSource {
    /// `base` is treated as a directory; a trailing `/` is added if missing.
    pub fn new(base: &str, timeout: Option<Duration>) -> Result<Self, LoadError> {
        let base = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        };
        let base = Url::parse(&base).map_err(|e| LoadError::Network(format!("{}: {}", base, e)))?;

        let mut builder = Client::builder().user_agent(concat!("tsboard/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LoadError::Network(e.to_string()))?;

        Ok(Self { base, client })
    }

    /// Absolute URL of `file_name`, percent-encoded.
    pub fn url_for(&self, file_name: &str) -> Result<Url, LoadError> {
        self.base
            .join(file_name)
            .map_err(|e| LoadError::Network(format!("{}: {}", file_name, e)))
    }
}

impl DataSource for HttpSource {
    fn fetch(&self, file_name: &str) -> Result<Fetched, LoadError> {
        let url = self.url_for(file_name)?;
        tracing::debug!(%url, "GET");

        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| LoadError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "upstream file not available");
            return Err(not_ready(file_name, status));
        }

        let modified = resp
            .headers()
            .get(LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_http_date);

        let bytes = resp
            .bytes()
            .map_err(|e| LoadError::Network(e.to_string()))?;
        let body = String::from_utf8(bytes.to_vec())
            .map_err(|e| LoadError::Parse(format!("{} is not UTF-8: {}", file_name, e)))?;

        Ok(Fetched { body, modified })
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

fn not_ready(file_name: &str, status: StatusCode) -> LoadError {
    LoadError::NotReady {
        file: file_name.to_string(),
        status: Some(status.as_u16()),
    }
}

/// Parses an HTTP-date (`Tue, 15 Nov 1994 08:12:31 GMT`).
fn parse_http_date(value: &str) -> Option<DateTime<Local>> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|ts| ts.with_timezone(&Local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn url_for_encodes_file_name() {
        let src = HttpSource::new("https://example.com/data/latest", None).unwrap();
        let url = src.url_for("外資大量買超.csv").unwrap();
        assert!(url.as_str().starts_with("https://example.com/data/latest/%E5%A4%96"));
        assert!(url.as_str().ends_with(".csv"));
    }

    #[test]
    fn url_for_resolves_relative_status_file() {
        let src = HttpSource::new("https://example.com/repo/data/latest/", None).unwrap();
        let url = src.url_for("../../last_update.json").unwrap();
        assert_eq!(url.as_str(), "https://example.com/repo/last_update.json");
    }

    #[test]
    fn invalid_base_is_rejected() {
        assert!(matches!(
            HttpSource::new("not a url", None),
            Err(LoadError::Network(_))
        ));
    }

    #[test]
    fn not_ready_carries_status() {
        let err = not_ready("x.csv", StatusCode::NOT_FOUND);
        assert_eq!(
            err,
            LoadError::NotReady {
                file: "x.csv".into(),
                status: Some(404)
            }
        );
    }

    #[test]
    fn parses_last_modified() {
        let ts = parse_http_date("Tue, 15 Nov 1994 08:12:31 GMT").unwrap();
        assert_eq!(ts.with_timezone(&Utc).to_rfc3339(), "1994-11-15T08:12:31+00:00");
        assert!(parse_http_date("yesterday").is_none());
    }
}
