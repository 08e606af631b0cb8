use std::time::Duration;

use crate::error::{CheckError, Result};
use crate::types::Endpoint;

/// Retrieves the raw text of a status resource.
///
/// Implementations make exactly one attempt and treat any non-success
/// response as a failure.
pub trait Fetcher {
    fn fetch(&self, endpoint: &Endpoint) -> Result<String>;
}

// ---------------------------------------------------------------------------
// HttpFetcher
// ---------------------------------------------------------------------------

/// Blocking HTTP(S) fetcher. `file://` endpoints are read from disk.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| CheckError::InvalidConfig(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, endpoint: &Endpoint) -> Result<String> {
        if let Some(path) = endpoint.file_path() {
            tracing::debug!("reading {path}");
            return std::fs::read_to_string(path).map_err(|e| fetch_error(endpoint, &e));
        }

        tracing::debug!("GET {endpoint}");
        let response = self
            .client
            .get(endpoint.as_str())
            .send()
            .map_err(|e| fetch_error(endpoint, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CheckError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| fetch_error(endpoint, &e))
    }
}

fn fetch_error(endpoint: &Endpoint, err: &dyn std::error::Error) -> CheckError {
    // reqwest keeps the useful part (DNS, refused, timed out) in the source chain.
    let mut reason = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        reason.push_str(": ");
        reason.push_str(&inner.to_string());
        source = inner.source();
    }
    CheckError::Fetch {
        endpoint: endpoint.to_string(),
        reason,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Duration::from_secs(5), "mirrorcheck-test").unwrap()
    }

    #[test]
    fn fetch_returns_body_on_success() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/debian/project/trace/master")
            .match_header("user-agent", "mirrorcheck-test")
            .with_status(200)
            .with_body("Date: Fri, 19 Jan 2018 19:26:41 UTC\n")
            .create();

        let endpoint = Endpoint::new(format!("{}/debian/project/trace/master", server.url()));
        let body = fetcher().fetch(&endpoint).unwrap();

        assert_eq!(body, "Date: Fri, 19 Jan 2018 19:26:41 UTC\n");
        mock.assert();
    }

    #[test]
    fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new();
        for status in [404, 500] {
            let path = format!("/state-{status}");
            let mock = server
                .mock("GET", path.as_str())
                .with_status(status)
                .with_body("date=2018-01-19T19:26:41Z\n")
                .create();

            let endpoint = Endpoint::new(format!("{}{path}", server.url()));
            let err = fetcher().fetch(&endpoint).unwrap_err();
            match err {
                CheckError::HttpStatus {
                    endpoint: ref e,
                    status: s,
                } => {
                    assert_eq!(s as usize, status);
                    assert!(e.ends_with(&path));
                }
                other => panic!("expected HttpStatus, got {other:?}"),
            }
            mock.assert();
        }
    }

    #[test]
    fn fetch_makes_a_single_attempt() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/lastsync")
            .with_status(503)
            .expect(1)
            .create();

        let endpoint = Endpoint::new(format!("{}/lastsync", server.url()));
        assert!(fetcher().fetch(&endpoint).is_err());
        mock.assert();
    }

    #[test]
    fn malformed_url_is_fetch_error() {
        let err = fetcher().fetch(&Endpoint::new("not a url")).unwrap_err();
        assert!(matches!(err, CheckError::Fetch { ref endpoint, .. } if endpoint == "not a url"));
    }

    #[test]
    fn file_endpoint_reads_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1516392227").unwrap();
        let endpoint = Endpoint::new(format!("file://{}", file.path().display()));

        let body = fetcher().fetch(&endpoint).unwrap();
        assert_eq!(body, "1516392227\n");
    }

    #[test]
    fn missing_local_file_is_fetch_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let endpoint = Endpoint::new(format!("file://{}/lastsync", dir.path().display()));
        let err = fetcher().fetch(&endpoint).unwrap_err();
        assert!(matches!(err, CheckError::Fetch { .. }));
    }
}
