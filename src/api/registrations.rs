use actix_web::{web, HttpResponse};
use mongodb::bson::doc;
use serde_json::Value;

use crate::database::{collections, MongoDB};
use crate::models::{registration, DeleteAck, InsertAck, PageQuery, UpdateAck};
use crate::utils::{body_to_document, merge_update, parse_object_id, AppError};

// Registrations carry no participant-count bookkeeping: the client patches
// the camp's participantCount separately.

#[utoipa::path(
    post,
    path = "/regCamps",
    tag = "Registrations",
    responses(
        (status = 200, description = "Insert acknowledgment", body = InsertAck),
        (status = 400, description = "Body is not a JSON object")
    )
)]
pub async fn create_registration(
    db: web::Data<MongoDB>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let new_registration = body_to_document(body.into_inner())?;
    log::info!(
        "📝 POST /regCamps - camp: {}, participant: {}",
        new_registration.get_str(registration::REG_CAMP_ID).unwrap_or("?"),
        new_registration.get_str(registration::EMAIL_OF_PARTICIPANT).unwrap_or("?")
    );

    let ack = db.insert_one(collections::REG_CAMPS, new_registration).await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    get,
    path = "/regCamps",
    tag = "Registrations",
    responses((status = 200, description = "All registrations"))
)]
pub async fn list_registrations(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let regs = db.find_many(collections::REG_CAMPS, doc! {}, None, None).await?;
    Ok(HttpResponse::Ok().json(regs))
}

#[utoipa::path(
    get,
    path = "/regCamps/{regCampId}",
    tag = "Registrations",
    params(("regCampId" = String, Path, description = "Camp id stored on the registration")),
    responses((status = 200, description = "Registrations for the camp"))
)]
pub async fn registrations_for_camp(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let regs = db
        .find_many(collections::REG_CAMPS, registration::by_camp(&path), None, None)
        .await?;
    Ok(HttpResponse::Ok().json(regs))
}

#[utoipa::path(
    get,
    path = "/regCamps_default/{id}",
    tag = "Registrations",
    params(("id" = String, Path, description = "Registration ObjectId")),
    responses(
        (status = 200, description = "Registration document or null"),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn get_registration(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;
    let found = db.find_one(collections::REG_CAMPS, doc! { "_id": id }).await?;
    Ok(HttpResponse::Ok().json(found))
}

#[utoipa::path(
    put,
    path = "/regCamps_default/{id}",
    tag = "Registrations",
    params(("id" = String, Path, description = "Registration ObjectId")),
    responses(
        (status = 200, description = "Merge-update acknowledgment", body = UpdateAck),
        (status = 400, description = "Malformed id or empty body")
    )
)]
pub async fn update_registration(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;
    let update = merge_update(body.into_inner())?;
    log::info!("✏️  PUT /regCamps_default/{}", id);

    let ack = db
        .update_one(collections::REG_CAMPS, doc! { "_id": id }, update)
        .await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    delete,
    path = "/regCamps/{id}",
    tag = "Registrations",
    params(("id" = String, Path, description = "Registration ObjectId")),
    responses(
        (status = 200, description = "Delete acknowledgment (deletedCount may be 0)", body = DeleteAck),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn delete_registration(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;
    log::info!("🗑️  DELETE /regCamps/{}", id);

    let ack = db.delete_one(collections::REG_CAMPS, doc! { "_id": id }).await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    get,
    path = "/regCampsPagination",
    tag = "Registrations",
    responses((status = 200, description = "One page of registrations, newest first"))
)]
pub async fn list_registrations_page(
    db: web::Data<MongoDB>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let regs = db
        .find_many(
            collections::REG_CAMPS,
            doc! {},
            Some(doc! { "_id": -1 }),
            Some(query.into_inner()),
        )
        .await?;
    Ok(HttpResponse::Ok().json(regs))
}

/// Full list for one participant; the client derives its page count from it.
#[utoipa::path(
    get,
    path = "/myRegCampsCount/{email}",
    tag = "Registrations",
    params(("email" = String, Path, description = "emailOfParticipant")),
    responses((status = 200, description = "All registrations of the participant"))
)]
pub async fn participant_registrations(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let regs = db
        .find_many(collections::REG_CAMPS, registration::by_participant(&path), None, None)
        .await?;
    Ok(HttpResponse::Ok().json(regs))
}

#[utoipa::path(
    get,
    path = "/myRegCamps/{email}",
    tag = "Registrations",
    params(("email" = String, Path, description = "emailOfParticipant")),
    responses((status = 200, description = "One page of the participant's registrations, newest first"))
)]
pub async fn participant_registrations_page(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let regs = db
        .find_many(
            collections::REG_CAMPS,
            registration::by_participant(&path),
            Some(doc! { "_id": -1 }),
            Some(query.into_inner()),
        )
        .await?;
    Ok(HttpResponse::Ok().json(regs))
}
