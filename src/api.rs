// API client module: a small blocking HTTP client that submits test case
// documents to the test endpoint. One client is built per run and reused
// for every file; each file is attempted exactly once.

use crate::config::RunConfig;
use crate::discovery::TestCaseFile;
use crate::error::{FileError, RunError};
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;

/// Content type sent with every test case document.
pub const TEST_CASE_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Blocking client bound to one endpoint and one bearer token.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl ApiClient {
    /// Build a client using the endpoint and timeouts of `config`.
    pub fn new(config: &RunConfig, token: &str) -> Result<Self, RunError> {
        let client = Client::builder()
            .user_agent(concat!("tcrun/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout)
            .build()
            .map_err(RunError::Client)?;
        Ok(ApiClient {
            client,
            endpoint: config.endpoint.clone(),
            token: token.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Authorization and content type headers for a submission.
    fn headers(&self) -> Result<HeaderMap, FileError> {
        let mut headers = HeaderMap::new();
        let val = format!("Bearer {}", self.token);
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&val)?);
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static(TEST_CASE_CONTENT_TYPE),
        );
        Ok(headers)
    }

    /// POST the raw bytes of `file` to the endpoint.
    ///
    /// Returns the response body when the endpoint answered `200`. Any
    /// other status is [`FileError::InvalidStatus`] carrying the status
    /// code and its canonical reason phrase (empty for unregistered codes).
    pub fn submit(&self, file: &TestCaseFile) -> Result<Vec<u8>, FileError> {
        let body = file.read()?;
        self.submit_bytes(body)
    }

    /// Same as [`ApiClient::submit`] for an in-memory document.
    pub fn submit_bytes(&self, body: Vec<u8>) -> Result<Vec<u8>, FileError> {
        debug!("POST {} ({} bytes)", self.endpoint, body.len());
        let res = self
            .client
            .post(&self.endpoint)
            .headers(self.headers()?)
            .body(body)
            .send()?;

        let status = res.status();
        debug!("{} answered {}", self.endpoint, status);
        if status != StatusCode::OK {
            return Err(FileError::InvalidStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("").to_string(),
            });
        }
        Ok(res.bytes()?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(token: &str) -> ApiClient {
        ApiClient::new(&RunConfig::new("http://127.0.0.1:9/run", "."), token).unwrap()
    }

    #[test]
    fn test_headers_carry_bearer_and_content_type() {
        let headers = client("abc123").headers().unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer abc123");
        assert_eq!(headers[CONTENT_TYPE], TEST_CASE_CONTENT_TYPE);
    }

    #[test]
    fn test_illegal_token_fails_the_submission() {
        let err = client("bad\ntoken").submit_bytes(b"<tc/>".to_vec()).unwrap_err();
        assert!(matches!(err, FileError::Token(_)));
    }

    #[test]
    fn test_connection_refused_is_transport_error() {
        // Port 9 (discard) is not expected to be listening on loopback.
        let err = client("t").submit_bytes(b"<tc/>".to_vec()).unwrap_err();
        assert!(matches!(err, FileError::Transport(_)));
    }
}
