//! One POST to the SQL endpoint, one response body back.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;

use crate::error::Error;

/// A response body together with the content type the engine declared for it.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// HTTP client bound to one query endpoint.
#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    endpoint: String,
    user_agent: String,
}

impl Transport {
    /// `timeout` bounds the whole round trip; it is the only deadline a query has.
    pub fn new(
        endpoint: impl Into<String>,
        user_agent: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Transport, Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Transport {
            client: builder.build()?,
            endpoint: endpoint.into(),
            user_agent: user_agent.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post a JSON request body. Anything but `200 OK` is an error carrying the status.
    pub async fn post(&self, body: Vec<u8>) -> Result<RawResponse, Error> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, &self.user_agent)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    tracing::warn!(%status, error = %err, "cannot read error response body");
                    String::new()
                }
            };
            return Err(Error::Status { status, body });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        Ok(RawResponse { content_type, body })
    }
}
