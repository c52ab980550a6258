//! querycheck-client — HTTP client for the search endpoint under test.
//!
//! [`QueryClient`] sends one GET per query and decodes the endpoint's result
//! container into [`ResultRecord`]s. Requests are single-shot: no retry, no
//! caching. Status and decoding rules live in [`decode`].

use std::time::Duration;

use querycheck_core::{EndpointConfig, Query, ResultRecord};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use tracing::debug;

mod decode;
mod error;

pub use error::ClientError;
pub use reqwest::StatusCode;

/// Stateless client for one configured search endpoint.
#[derive(Debug, Clone)]
pub struct QueryClient {
    http: reqwest::Client,
    endpoint: EndpointConfig,
}

impl QueryClient {
    pub fn new(endpoint: EndpointConfig) -> Result<Self, ClientError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&endpoint.user_agent)
                .map_err(|_| ClientError::UserAgent(endpoint.user_agent.clone()))?,
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(endpoint.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &EndpointConfig {
        &self.endpoint
    }

    /// GET the endpoint without a query and report its status. Any status is
    /// returned as-is; only transport failures are errors.
    pub async fn probe(&self) -> Result<StatusCode, ClientError> {
        let url = &self.endpoint.url;
        debug!(url = %url, "probing endpoint");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ClientError::Transport { url: url.clone(), source })?;

        debug!(url = %url, status = %response.status(), "probe answered");
        Ok(response.status())
    }

    /// Run `query` and return the raw JSON items.
    pub async fn search_raw(&self, query: &Query) -> Result<Vec<Value>, ClientError> {
        let url = &self.endpoint.url;
        debug!(url = %url, query = %query, "searching");

        let response = self
            .http
            .get(url)
            .query(&[(self.endpoint.query_param.as_str(), query.as_str())])
            .send()
            .await
            .map_err(|source| ClientError::Transport { url: url.clone(), source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Transport { url: url.clone(), source })?;

        if !status.is_success() {
            return Err(ClientError::Status { url: url.clone(), status, body });
        }

        let items = decode::items(&body, &self.endpoint.results_key)
            .map_err(|message| ClientError::Decode { url: url.clone(), message })?;
        debug!(query = %query, count = items.len(), "search returned");
        Ok(items)
    }

    /// Run `query` and return the decoded records.
    pub async fn search(&self, query: &Query) -> Result<Vec<ResultRecord>, ClientError> {
        Ok(self
            .search_raw(query)
            .await?
            .into_iter()
            .map(ResultRecord::new)
            .collect())
    }
}
