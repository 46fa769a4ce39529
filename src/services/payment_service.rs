use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::PaymentConfig;
use crate::utils::AppError;

/// Creates payment intents and hands back the client secret the browser
/// needs to confirm the payment.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn create_payment_intent(&self, amount_minor: i64) -> Result<String, AppError>;
}

/// Converts a decimal price into integer minor units (cents).
/// Missing, non-numeric and sub-cent prices are rejected before rounding.
pub fn price_to_minor_units(price: Option<&Value>) -> Result<i64, AppError> {
    let price = match price {
        None | Some(Value::Null) => {
            return Err(AppError::InvalidRequest("price is required".to_string()));
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    }
    .filter(|p| p.is_finite())
    .ok_or_else(|| AppError::InvalidRequest("price must be a number".to_string()))?;

    let exact_cents = price * 100.0;
    if exact_cents < 1.0 {
        return Err(AppError::InvalidRequest("price must be at least 0.01".to_string()));
    }

    let cents = exact_cents.round();
    if cents >= i64::MAX as f64 {
        return Err(AppError::InvalidRequest("price is too large".to_string()));
    }

    Ok(cents as i64)
}

#[derive(Debug, Deserialize)]
struct PaymentIntent {
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: Option<String>,
}

/// Stripe `POST /v1/payment_intents` with automatic payment methods.
pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
    api_base: String,
    currency: String,
}

impl StripeClient {
    pub fn new(config: &PaymentConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            secret_key: config.secret_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            currency: config.currency.clone(),
        })
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn create_payment_intent(&self, amount_minor: i64) -> Result<String, AppError> {
        log::info!("💳 Creating payment intent: {} {}", amount_minor, self.currency);

        let url = format!("{}/v1/payment_intents", self.api_base);
        let amount = amount_minor.to_string();
        let form = [
            ("amount", amount.as_str()),
            ("currency", self.currency.as_str()),
            ("automatic_payment_methods[enabled]", "true"),
        ];

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::PaymentProvider(format!("Failed to reach payment provider: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<StripeErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| "no error message".to_string());
            return Err(AppError::PaymentProvider(format!("{}: {}", status, message)));
        }

        let intent: PaymentIntent = response
            .json()
            .await
            .map_err(|e| AppError::PaymentProvider(format!("Failed to parse payment intent: {}", e)))?;

        intent
            .client_secret
            .ok_or_else(|| AppError::PaymentProvider("payment intent has no client_secret".to_string()))
    }
}
