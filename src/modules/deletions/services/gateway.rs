//! Remote delete gateway client.
//!
//! All delete traffic to the upstream clinic API goes through the
//! [`DeleteGateway`] trait so the state machine can be tested against a mock.
//! The HTTP implementation normalizes the gateway's assorted error body
//! shapes into one [`DeleteError`] union at this boundary; nothing downstream
//! re-derives error details from raw responses.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::modules::deletions::models::ResourceKind;

/// Normalized failure modes of a remote delete call.
#[derive(thiserror::Error, Debug, Clone)]
pub enum DeleteError {
    /// Dependent records exist; the caller must decide whether to cascade.
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        dependent_ids: Vec<String>,
    },

    /// Gateway answered with a non-conflict error status.
    #[error("Gateway returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The bounded request timeout elapsed. Destructive calls are never
    /// retried automatically.
    #[error("Delete request timed out")]
    Timeout,

    /// Connection-level failure.
    #[error("Network error: {0}")]
    Network(String),
}

/// Issues remote delete calls.
#[async_trait]
pub trait DeleteGateway: Send + Sync {
    /// `DELETE /{resource}/{id}`, or the cascading variant with
    /// `?cascade=true`. Success covers 200 and 204.
    async fn delete(
        &self,
        resource: ResourceKind,
        id: &str,
        cascade: bool,
    ) -> Result<(), DeleteError>;
}

/// Error body shapes the upstream gateway is known to produce. Older
/// endpoints send `message`, newer ones a list of `errors`, and some proxies
/// only a bare `statusText`.
#[derive(Debug, Default, Deserialize)]
struct GatewayErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default, rename = "statusText")]
    status_text: Option<String>,
    #[serde(default, rename = "dependentIds")]
    dependent_ids: Vec<String>,
}

impl GatewayErrorBody {
    fn normalized_message(&self, status: StatusCode) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        if !self.errors.is_empty() {
            return self.errors.join("; ");
        }
        if let Some(status_text) = &self.status_text {
            return status_text.clone();
        }
        format!("request failed with status {}", status.as_u16())
    }
}

/// reqwest-backed gateway client.
pub struct HttpDeleteGateway {
    client: Client,
    base_url: String,
}

impl HttpDeleteGateway {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn delete_url(&self, resource: ResourceKind, id: &str, cascade: bool) -> String {
        let mut url = format!("{}/{}/{}", self.base_url, resource.path(), id);
        if cascade {
            url.push_str("?cascade=true");
        }
        url
    }
}

#[async_trait]
impl DeleteGateway for HttpDeleteGateway {
    async fn delete(
        &self,
        resource: ResourceKind,
        id: &str,
        cascade: bool,
    ) -> Result<(), DeleteError> {
        let url = self.delete_url(resource, id, cascade);

        let response = self.client.delete(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                DeleteError::Timeout
            } else {
                DeleteError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body: GatewayErrorBody = response.json().await.unwrap_or_default();
        let message = body.normalized_message(status);

        if status == StatusCode::CONFLICT {
            tracing::debug!(
                resource = %resource,
                id = %id,
                dependents = body.dependent_ids.len(),
                "delete conflict, dependent records exist"
            );
            return Err(DeleteError::Conflict {
                message,
                dependent_ids: body.dependent_ids,
            });
        }

        Err(DeleteError::Status {
            status: status.as_u16(),
            message,
        })
    }
}
