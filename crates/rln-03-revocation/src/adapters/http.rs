//! External group service client.
//!
//! Removes members with `DELETE {base}/groups/{group_id}/members/{member}`,
//! authenticated by the group's admin key in `x-api-key`. Addresses without
//! a scheme are reached over HTTPS.

use crate::ports::outbound::{ExternalGroupClient, ExternalGroupError};
use async_trait::async_trait;
use reqwest::Client;
use shared_types::{ExternalGroup, U256};
use std::time::Duration;
use tracing::debug;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for the external group service.
#[derive(Debug, Clone)]
pub struct HttpExternalGroupClient {
    client: Client,
}

impl HttpExternalGroupClient {
    /// Create a client with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, ExternalGroupError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(2)))
            .build()
            .map_err(|e| ExternalGroupError::Http(e.to_string()))?;

        Ok(Self { client })
    }

    /// Member URL for `rate_commitment` in `group`.
    pub fn member_url(group: &ExternalGroup, rate_commitment: &U256) -> String {
        let address = group.address.trim_end_matches('/');
        let base = if address.starts_with("http://") || address.starts_with("https://") {
            address.to_string()
        } else {
            format!("https://{address}")
        };
        format!("{base}/groups/{}/members/{rate_commitment}", group.group_id)
    }
}

#[async_trait]
impl ExternalGroupClient for HttpExternalGroupClient {
    async fn remove_member(
        &self,
        group: &ExternalGroup,
        rate_commitment: &U256,
    ) -> Result<(), ExternalGroupError> {
        let api_key = group
            .api_key
            .as_deref()
            .ok_or_else(|| ExternalGroupError::MissingApiKey(group.group_id.clone()))?;

        let url = Self::member_url(group, rate_commitment);
        debug!(%url, "Removing member from external group");

        let response = self
            .client
            .delete(&url)
            .header("x-api-key", api_key)
            .header("content-type", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ExternalGroupError::Connection(format!("Cannot connect to {}", group.address))
                } else {
                    ExternalGroupError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(ExternalGroupError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
