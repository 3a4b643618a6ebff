use anyhow::Context;
use bytes::Bytes;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error as ThisError;
use url::Url;

/// JSON-over-HTTP client with request tracing and a bounded timeout.
///
/// Requests are never retried; a failed call is reported to the caller once.
#[derive(Clone)]
pub struct HttpClient {
    client: ClientWithMiddleware,
}

#[derive(ThisError, Debug)]
pub enum HttpClientError {
    #[error("Failed to fetch request from {url}")]
    Transport {
        url: Url,
        #[source]
        source: anyhow::Error,
    },
    #[error("{url} responded with status {status}")]
    Status {
        url: Url,
        status: reqwest::StatusCode,
    },
    #[error("Failed to deserialize response from {url}")]
    Decode {
        url: Url,
        #[source]
        source: serde_json::Error,
    },
}

impl HttpClient {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build http client")?;
        Ok(Self {
            client: ClientBuilder::new(client)
                .with(TracingMiddleware::default())
                .build(),
        })
    }

    async fn get_bytes(&self, url: &Url) -> Result<Bytes, HttpClientError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| HttpClientError::Transport {
                url: url.clone(),
                source: err.into(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpClientError::Status {
                url: url.clone(),
                status,
            });
        }

        response
            .bytes()
            .await
            .map_err(|err| HttpClientError::Transport {
                url: url.clone(),
                source: err.into(),
            })
    }

    pub async fn get_json<DTO: DeserializeOwned>(&self, url: Url) -> Result<DTO, HttpClientError> {
        let body = self.get_bytes(&url).await?;
        serde_json::from_slice::<DTO>(&body)
            .map_err(|source| HttpClientError::Decode { url, source })
    }
}
