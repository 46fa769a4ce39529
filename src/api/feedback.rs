use actix_web::{web, HttpResponse};
use mongodb::bson::doc;
use serde_json::Value;

use crate::database::{collections, MongoDB};
use crate::models::InsertAck;
use crate::utils::{body_to_document, parse_object_id, AppError};

#[utoipa::path(
    post,
    path = "/feedback",
    tag = "Feedback",
    responses((status = 200, description = "Insert acknowledgment", body = InsertAck))
)]
pub async fn create_feedback(
    db: web::Data<MongoDB>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let feedback = body_to_document(body.into_inner())?;
    log::info!("💬 POST /feedback");

    let ack = db.insert_one(collections::FEEDBACK, feedback).await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    get,
    path = "/feedback",
    tag = "Feedback",
    responses((status = 200, description = "All feedback, newest first"))
)]
pub async fn list_feedback(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let items = db
        .find_many(collections::FEEDBACK, doc! {}, Some(doc! { "_id": -1 }), None)
        .await?;
    Ok(HttpResponse::Ok().json(items))
}

#[utoipa::path(
    get,
    path = "/feedback/{id}",
    tag = "Feedback",
    params(("id" = String, Path, description = "Feedback ObjectId")),
    responses(
        (status = 200, description = "Feedback document or null"),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn get_feedback(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;
    let found = db.find_one(collections::FEEDBACK, doc! { "_id": id }).await?;
    Ok(HttpResponse::Ok().json(found))
}
