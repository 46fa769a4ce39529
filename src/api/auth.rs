use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::middleware::VerifiedPayload;
use crate::services::TokenService;
use crate::utils::AppError;

/// Issues a token for the posted identity and stores it in the `token` cookie.
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    responses(
        (status = 200, description = "Token cookie set; body is {\"success\": true}"),
        (status = 400, description = "Body is not a JSON object")
    )
)]
pub async fn issue_token(
    tokens: web::Data<TokenService>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let payload = match body.into_inner() {
        Value::Object(map) => map,
        _ => return Err(AppError::InvalidRequest("token payload must be a JSON object".to_string())),
    };

    log::info!(
        "🔐 POST /jwt - {}",
        payload.get("email").and_then(Value::as_str).unwrap_or("<no email>")
    );

    let token = tokens.issue(payload)?;

    Ok(HttpResponse::Ok()
        .cookie(tokens.session_cookie(token))
        .json(serde_json::json!({ "success": true })))
}

/// Clears the cookie. The token stays cryptographically valid until it expires.
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Token cookie cleared; body is {\"success\": true}")
    )
)]
pub async fn logout(tokens: web::Data<TokenService>) -> HttpResponse {
    log::info!("👋 POST /logout");

    HttpResponse::Ok()
        .cookie(tokens.removal_cookie())
        .json(serde_json::json!({ "success": true }))
}

/// Echoes the payload of the token cookie. Runs behind `TokenGuard::all()`.
#[utoipa::path(
    get,
    path = "/verify",
    tag = "Auth",
    responses(
        (status = 200, description = "Decoded token payload"),
        (status = 401, description = "Missing, invalid or expired token")
    )
)]
pub async fn verify(payload: web::ReqData<VerifiedPayload>) -> HttpResponse {
    let VerifiedPayload(claims) = payload.into_inner();
    HttpResponse::Ok().json(claims)
}
