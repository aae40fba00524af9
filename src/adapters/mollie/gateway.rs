//! Mollie payment processor adapter.
//!
//! Implements [`MandateGateway`] against the Mollie v2 REST API. Mandate
//! creation posts to `/v2/customers/{id}/mandates`; a 404 means the
//! customer record is not yet visible processor-side (propagation lag) and
//! maps to the retryable [`GatewayError::CustomerNotFound`].
//!
//! # Security
//!
//! The API key is held as a `secrecy::SecretString` and only exposed when
//! building the Authorization header.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::MollieConfig;
use crate::domain::foundation::{CustomerId, MandateId};
use crate::ports::{GatewayError, MandateGateway};

/// Mollie gateway adapter.
pub struct MollieGateway {
    config: MollieConfig,
    http_client: reqwest::Client,
}

impl MollieGateway {
    /// Create a new Mollie adapter with the given configuration.
    pub fn new(config: MollieConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn mandates_url(&self, customer_id: &CustomerId) -> String {
        format!(
            "{}/v2/customers/{}/mandates",
            self.config.base_url.trim_end_matches('/'),
            customer_id
        )
    }
}

/// Request body for mandate creation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateMandateBody<'a> {
    method: &'static str,
    consumer_name: &'a str,
    consumer_account: &'a str,
}

/// Subset of Mollie's mandate resource we consume.
#[derive(Debug, Deserialize)]
struct MandateResource {
    id: String,
}

/// Mollie's error document shape.
#[derive(Debug, Deserialize)]
struct MollieErrorBody {
    #[serde(default)]
    title: String,
    #[serde(default)]
    detail: String,
}

#[async_trait]
impl MandateGateway for MollieGateway {
    async fn create_mandate(
        &self,
        customer_id: &CustomerId,
        consumer_name: &str,
        consumer_account: &str,
    ) -> Result<MandateId, GatewayError> {
        let response = self
            .http_client
            .post(self.mandates_url(customer_id))
            .bearer_auth(self.config.api_key())
            .json(&CreateMandateBody {
                method: "directdebit",
                consumer_name,
                consumer_account,
            })
            .send()
            .await
            .map_err(|err| GatewayError::Network(err.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::CustomerNotFound(customer_id.clone()));
        }

        if !status.is_success() {
            let body: MollieErrorBody = response.json().await.unwrap_or(MollieErrorBody {
                title: "Unknown Error".to_string(),
                detail: String::new(),
            });
            return Err(GatewayError::Api {
                status: status.as_u16(),
                title: body.title,
                detail: body.detail,
            });
        }

        let resource: MandateResource = response
            .json()
            .await
            .map_err(|err| GatewayError::Network(format!("malformed mandate resource: {}", err)))?;

        MandateId::new(resource.id)
            .map_err(|err| GatewayError::Network(format!("empty mandate id: {}", err)))
    }
}
