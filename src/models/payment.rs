use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Alternate key used by the payment update endpoint. Unique (sparse) index.
pub const KEY_AFTER_PAYMENT: &str = "keyAfterPayment";

pub fn by_payment_key(key: &str) -> Document {
    doc! { KEY_AFTER_PAYMENT: key }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PaymentIntentRequest {
    /// Decimal price in major currency units; numeric strings are accepted
    #[schema(value_type = Option<f64>, example = 12.5)]
    pub price: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientSecretResponse {
    pub client_secret: String,
}
