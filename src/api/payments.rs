use actix_web::{web, HttpResponse};

use crate::models::{ClientSecretResponse, PaymentIntentRequest};
use crate::services::payment_service::{price_to_minor_units, PaymentProvider};
use crate::utils::AppError;

/// The provider is only called for prices of at least one cent.
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "Payments",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Payment intent created", body = ClientSecretResponse),
        (status = 400, description = "Missing, non-numeric or sub-cent price"),
        (status = 502, description = "Payment provider failure")
    )
)]
pub async fn create_payment_intent(
    provider: web::Data<dyn PaymentProvider>,
    body: web::Json<PaymentIntentRequest>,
) -> Result<HttpResponse, AppError> {
    let amount = price_to_minor_units(body.price.as_ref())?;
    log::info!("💳 POST /create-payment-intent - amount: {}", amount);

    let client_secret = provider.create_payment_intent(amount).await?;

    Ok(HttpResponse::Ok().json(ClientSecretResponse { client_secret }))
}
