//! Chargily payment API client.
//!
//! Checkout sessions are created against the Chargily Pay v2 API. Webhook
//! deliveries are never trusted on their own: the handler re-fetches the
//! checkout by id over the authenticated API and only the fetched status
//! drives settlement. The delivered payload is compared against the fetched
//! one (minus fields Chargily mutates between delivery and fetch) purely for
//! observability; a mismatch is logged, not rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ChargilyConfig;
use crate::error::AppError;

/// Checkout status reported by Chargily for a settled payment.
pub const CHECKOUT_STATUS_PAID: &str = "paid";

/// Payload fields Chargily mutates between webhook delivery and API fetch,
/// excluded from the canonical comparison.
const VOLATILE_FIELDS: &[&str] = &["status", "updated_at"];

/// Request body for creating a checkout session.
#[derive(Debug, Serialize)]
struct CreateCheckoutRequest<'a> {
    amount: f64,
    currency: &'a str,
    success_url: &'a str,
    failure_url: &'a str,
    metadata: Value,
}

/// A checkout session as returned by the Chargily API.
#[derive(Debug, Clone, Deserialize)]
pub struct Checkout {
    pub id: String,
    pub status: String,
    pub amount: f64,
    pub checkout_url: Option<String>,
    pub metadata: Option<Value>,
}

/// Client for the Chargily Pay API.
pub struct ChargilyClient {
    http: reqwest::Client,
    config: ChargilyConfig,
}

impl ChargilyClient {
    pub fn new(config: ChargilyConfig) -> Self {
        ChargilyClient {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create a checkout session for `amount` Algerian dinars.
    ///
    /// The caller's user id (and, for plan purchases, the subscription id)
    /// travels in the metadata so the webhook can route the settlement
    /// without trusting anything else in the delivery.
    pub async fn create_checkout(
        &self,
        amount: f64,
        metadata: Value,
        success_url: &str,
        failure_url: &str,
    ) -> Result<Checkout, AppError> {
        let request = CreateCheckoutRequest {
            amount,
            currency: "dzd",
            success_url,
            failure_url,
            metadata,
        };

        let response = self
            .http
            .post(format!("{}/checkouts", self.config.base_url))
            .bearer_auth(&self.config.secret_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| AppError::InternalError(format!("Chargily request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, "Chargily checkout creation rejected");
            return Err(AppError::InternalError(
                "Payment provider rejected the checkout".to_string(),
            ));
        }

        response
            .json::<Checkout>()
            .await
            .map_err(|err| AppError::InternalError(format!("Chargily response invalid: {err}")))
    }

    /// Expire a checkout session so its payment page stops accepting money.
    ///
    /// Called when a session is superseded by a new one. A payment completed
    /// against the old session would settle nothing, so the old session must
    /// die; callers treat failure as non-fatal and log it.
    pub async fn expire_checkout(&self, checkout_id: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(format!(
                "{}/checkouts/{checkout_id}/expire",
                self.config.base_url
            ))
            .bearer_auth(&self.config.secret_key)
            .send()
            .await
            .map_err(|err| AppError::InternalError(format!("Chargily request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::InternalError(format!(
                "Payment provider refused to expire the session ({status})"
            )));
        }
        Ok(())
    }

    /// Fetch a checkout session by id over the authenticated API.
    pub async fn get_checkout(&self, checkout_id: &str) -> Result<Checkout, AppError> {
        let response = self
            .http
            .get(format!("{}/checkouts/{checkout_id}", self.config.base_url))
            .bearer_auth(&self.config.secret_key)
            .send()
            .await
            .map_err(|err| AppError::InternalError(format!("Chargily request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(%status, checkout_id, "Chargily checkout fetch failed");
            return Err(AppError::InternalError(
                "Payment provider lookup failed".to_string(),
            ));
        }

        response
            .json::<Checkout>()
            .await
            .map_err(|err| AppError::InternalError(format!("Chargily response invalid: {err}")))
    }
}

/// Strip the volatile fields from a checkout payload so the delivered and
/// fetched forms can be compared.
pub fn canonicalize(payload: &Value) -> Value {
    let mut canonical = payload.clone();
    if let Some(map) = canonical.as_object_mut() {
        for field in VOLATILE_FIELDS {
            map.remove(*field);
        }
    }
    canonical
}

/// Log when the delivered webhook payload disagrees with the checkout as
/// fetched from the API. Observability only: settlement already ignores the
/// delivered payload beyond its id.
pub fn log_payload_divergence(checkout_id: &str, delivered: &Value, fetched: &Value) {
    if canonicalize(delivered) != canonicalize(fetched) {
        tracing::warn!(
            checkout_id,
            "Webhook payload differs from fetched checkout beyond volatile fields"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonicalize_strips_only_volatile_fields() {
        let payload = json!({
            "id": "ch_1",
            "amount": 90.0,
            "status": "paid",
            "updated_at": 1700000000,
        });
        let canonical = canonicalize(&payload);
        assert_eq!(canonical, json!({ "id": "ch_1", "amount": 90.0 }));
    }

    #[test]
    fn test_volatile_difference_is_equal_after_canonicalization() {
        let delivered = json!({ "id": "ch_1", "amount": 90.0, "status": "paid" });
        let fetched = json!({ "id": "ch_1", "amount": 90.0, "status": "pending" });
        assert_eq!(canonicalize(&delivered), canonicalize(&fetched));
    }
}
