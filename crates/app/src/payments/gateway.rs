//! HTTP payment gateway.

use alero::checkout::OrderSummary;
use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::payments::PaymentError;

/// Configuration for the payment provider.
#[derive(Debug, Clone)]
pub struct PaymentsConfig {
    /// Endpoint that accepts an order and answers with a redirect URL.
    pub endpoint: String,
}

/// Payment provider reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    config: PaymentsConfig,
    http: Client,
}

impl HttpPaymentGateway {
    #[must_use]
    pub fn new(config: PaymentsConfig, http: Client) -> Self {
        Self { config, http }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_redirect(&self, order: OrderSummary) -> Result<String, PaymentError> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .json(&order)
            .send()
            .await?;

        let status = response.status();

        if status.is_server_error() {
            let text = response.text().await.unwrap_or_default();

            return Err(PaymentError::UnexpectedResponse(format!(
                "payment request failed with status {status}: {text}"
            )));
        }

        let parsed: PaymentResponse = response.json().await?;
        let url = parsed.into_redirect()?;

        info!(total = order.total, "payment redirect created");

        Ok(url)
    }
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Register the order with the provider and return the URL the buyer is sent to.
    async fn create_redirect(&self, order: OrderSummary) -> Result<String, PaymentError>;
}

#[derive(Debug, Deserialize)]
struct PaymentResponse {
    #[serde(default)]
    url: Option<String>,

    #[serde(default)]
    error: Option<String>,
}

impl PaymentResponse {
    fn into_redirect(self) -> Result<String, PaymentError> {
        match (self.url, self.error) {
            (_, Some(error)) => Err(PaymentError::Rejected(error)),
            (Some(url), None) if !url.trim().is_empty() => Ok(url),
            _ => Err(PaymentError::UnexpectedResponse(
                "response carried neither url nor error".to_string(),
            )),
        }
    }
}
