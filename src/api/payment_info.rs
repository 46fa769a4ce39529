use actix_web::{web, HttpResponse};
use mongodb::bson::doc;
use serde_json::Value;

use crate::database::{collections, MongoDB};
use crate::models::{payment, registration, InsertAck, PageQuery, UpdateAck};
use crate::utils::{body_to_document, merge_update, parse_object_id, AppError};

#[utoipa::path(
    post,
    path = "/paymentInfo",
    tag = "PaymentInfo",
    responses(
        (status = 200, description = "Insert acknowledgment", body = InsertAck),
        (status = 409, description = "keyAfterPayment already recorded")
    )
)]
pub async fn create_payment_info(
    db: web::Data<MongoDB>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let record = body_to_document(body.into_inner())?;
    log::info!(
        "🧾 POST /paymentInfo - participant: {}",
        record.get_str(registration::EMAIL_OF_PARTICIPANT).unwrap_or("?")
    );

    let ack = db.insert_one(collections::PAYMENT_INFO, record).await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    get,
    path = "/paymentInfo",
    tag = "PaymentInfo",
    responses((status = 200, description = "All payment records"))
)]
pub async fn list_payment_info(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let records = db.find_many(collections::PAYMENT_INFO, doc! {}, None, None).await?;
    Ok(HttpResponse::Ok().json(records))
}

#[utoipa::path(
    get,
    path = "/paymentInfo/{id}",
    tag = "PaymentInfo",
    params(("id" = String, Path, description = "Payment record ObjectId")),
    responses(
        (status = 200, description = "Payment record or null"),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn get_payment_info(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;
    let found = db.find_one(collections::PAYMENT_INFO, doc! { "_id": id }).await?;
    Ok(HttpResponse::Ok().json(found))
}

/// Addressed by `keyAfterPayment`, not `_id`.
#[utoipa::path(
    put,
    path = "/paymentInfo_up/{id}",
    tag = "PaymentInfo",
    params(("id" = String, Path, description = "keyAfterPayment of the record")),
    responses(
        (status = 200, description = "Merge-update acknowledgment", body = UpdateAck),
        (status = 400, description = "Empty body")
    )
)]
pub async fn update_payment_info(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let key = path.into_inner();
    let update = merge_update(body.into_inner())?;
    log::info!("✏️  PUT /paymentInfo_up/{}", key);

    let ack = db
        .update_one(collections::PAYMENT_INFO, payment::by_payment_key(&key), update)
        .await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    get,
    path = "/paymentInfoBy/{email}",
    tag = "PaymentInfo",
    params(("email" = String, Path, description = "emailOfParticipant")),
    responses((status = 200, description = "All payments of the participant"))
)]
pub async fn participant_payments(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let records = db
        .find_many(collections::PAYMENT_INFO, registration::by_participant(&path), None, None)
        .await?;
    Ok(HttpResponse::Ok().json(records))
}

#[utoipa::path(
    get,
    path = "/paymentInfoByCount/{email}",
    tag = "PaymentInfo",
    params(("email" = String, Path, description = "emailOfParticipant")),
    responses((status = 200, description = "One page of the participant's payments, newest first"))
)]
pub async fn participant_payments_page(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let records = db
        .find_many(
            collections::PAYMENT_INFO,
            registration::by_participant(&path),
            Some(doc! { "_id": -1 }),
            Some(query.into_inner()),
        )
        .await?;
    Ok(HttpResponse::Ok().json(records))
}
