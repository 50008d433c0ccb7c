//! Blocking document retrieval.
use std::{fmt, thread, time::Duration};

use log::{debug, warn};
use reqwest::{StatusCode, Url};

#[derive(Debug)]
pub enum FetchError {
    Reqwest(reqwest::Error),
    /// Server answered with a status that won't get better by retrying.
    Status { url: Url, status: StatusCode },
    /// Retry budget exhausted.
    Exhausted {
        url: Url,
        attempts: usize,
        last: Box<FetchError>,
    },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Reqwest(e) => write!(f, "{e}"),
            FetchError::Status { url, status } => write!(f, "{url} answered {status}"),
            FetchError::Exhausted {
                url,
                attempts,
                last,
            } => write!(f, "gave up on {url} after {attempts} attempts ({last})"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Reqwest(err)
    }
}

impl FetchError {
    fn is_transient(&self) -> bool {
        match self {
            FetchError::Reqwest(e) => e.is_timeout() || e.is_connect() || e.is_body(),
            FetchError::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            FetchError::Exhausted { .. } => false,
        }
    }
}

/// Retrieves the raw bytes behind a locator.
///
/// Implementors handle their own retry policy: an `Err` means the resource
/// is not retrievable.
pub trait Fetch {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

/// HTTP fetcher with a bounded number of retries on transient failures.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    retries: usize,
    backoff: Duration,
}

impl HttpFetcher {
    pub fn new(retries: usize) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            client,
            retries,
            backoff: Duration::from_millis(500),
        })
    }

    fn fetch_once(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url.clone()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.clone(),
                status,
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            debug!("fetching {url} (attempt {attempt})");
            match self.fetch_once(url) {
                Ok(body) => return Ok(body),
                Err(e) if e.is_transient() && attempt <= self.retries => {
                    warn!("transient failure on {url}: {e}");
                    thread::sleep(self.backoff * attempt as u32);
                }
                Err(e) if e.is_transient() => {
                    return Err(FetchError::Exhausted {
                        url: url.clone(),
                        attempts: attempt,
                        last: Box::new(e),
                    })
                }
                Err(e) => return Err(e),
            }
        }
    }
}
