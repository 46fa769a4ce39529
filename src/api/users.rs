use actix_web::{web, HttpResponse};
use mongodb::bson::doc;
use serde_json::Value;

use crate::database::{collections, MongoDB};
use crate::models::{user, InsertAck};
use crate::utils::{body_to_document, AppError};

#[utoipa::path(
    get,
    path = "/user",
    tag = "Users",
    responses((status = 200, description = "All user documents"))
)]
pub async fn list_users(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let users = db.find_many(collections::USERS, doc! {}, None, None).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// First user whose `user_email` matches, or `null`.
#[utoipa::path(
    get,
    path = "/user/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "Value of user_email")),
    responses((status = 200, description = "User document or null"))
)]
pub async fn get_user_by_email(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();
    let found = db.find_one(collections::USERS, user::by_email(&email)).await?;
    Ok(HttpResponse::Ok().json(found))
}

#[utoipa::path(
    post,
    path = "/user",
    tag = "Users",
    responses(
        (status = 200, description = "Insert acknowledgment", body = InsertAck),
        (status = 400, description = "Body is not a JSON object")
    )
)]
pub async fn create_user(
    db: web::Data<MongoDB>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let profile = body_to_document(body.into_inner())?;
    log::info!("👤 POST /user - {}", profile.get_str(user::USER_EMAIL).unwrap_or("<no email>"));

    let ack = db.insert_one(collections::USERS, profile).await?;
    Ok(HttpResponse::Ok().json(ack))
}
