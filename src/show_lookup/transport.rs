//! HTTP transport used by show providers
//!
//! Providers never create their own HTTP client; they are handed an
//! `HttpTransport`. The production implementation wraps a blocking reqwest
//! client, tests substitute an in-memory fake.

use super::LookupError;

/// User agent sent with every request
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A capability to perform a single HTTP GET and return the response body.
pub trait HttpTransport {
    /// Performs a GET request against `url` with the given query parameters.
    ///
    /// Query values are URL-encoded by the transport.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::RequestError` if the request cannot be sent or the
    /// body cannot be read, and `LookupError::HttpStatus` for any non-success
    /// status code.
    fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, LookupError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, LookupError> {
        (**self).get_text(url, query)
    }
}

/// Transport backed by `reqwest::blocking::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Creates a transport with the crate's user agent.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::ClientSetup` if the TLS backend cannot be
    /// initialized.
    pub fn new() -> Result<Self, LookupError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LookupError::ClientSetup(e.to_string()))?;

        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, LookupError> {
        tracing::debug!(url, ?query, "sending request");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| LookupError::RequestError {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "received response");

        if !status.is_success() {
            return Err(LookupError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| LookupError::RequestError {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}
