use actix_web::{web, HttpResponse};
use mongodb::bson::doc;
use serde_json::Value;

use crate::database::{collections, MongoDB};
use crate::models::{camp, CampOrder, DeleteAck, InsertAck, PageQuery, UpdateAck};
use crate::utils::{body_to_document, merge_update, parse_object_id, AppError};

async fn list_ordered(db: &MongoDB, order: CampOrder) -> Result<HttpResponse, AppError> {
    let camps = db
        .find_many(collections::CAMPS, doc! {}, Some(order.sort()), None)
        .await?;
    Ok(HttpResponse::Ok().json(camps))
}

#[utoipa::path(
    post,
    path = "/camps",
    tag = "Camps",
    responses(
        (status = 200, description = "Insert acknowledgment", body = InsertAck),
        (status = 400, description = "Body is not a JSON object")
    )
)]
pub async fn create_camp(
    db: web::Data<MongoDB>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let new_camp = body_to_document(body.into_inner())?;
    log::info!("🏕️  POST /camps - {}", new_camp.get_str(camp::fields::TITLE).unwrap_or("<untitled>"));

    let ack = db.insert_one(collections::CAMPS, new_camp).await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    get,
    path = "/camps",
    tag = "Camps",
    responses((status = 200, description = "All camps, newest first"))
)]
pub async fn list_camps(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    list_ordered(&db, CampOrder::Newest).await
}

#[utoipa::path(
    get,
    path = "/campsDataPagination",
    tag = "Camps",
    responses(
        (status = 200, description = "One page of camps, newest first"),
        (status = 400, description = "page/size are not non-negative integers")
    )
)]
pub async fn list_camps_page(
    db: web::Data<MongoDB>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let camps = db
        .find_many(
            collections::CAMPS,
            doc! {},
            Some(CampOrder::Newest.sort()),
            Some(query.into_inner()),
        )
        .await?;
    Ok(HttpResponse::Ok().json(camps))
}

/// Unsorted full list; the client only counts it.
#[utoipa::path(
    get,
    path = "/campsDataLengthPagination",
    tag = "Camps",
    responses((status = 200, description = "All camps"))
)]
pub async fn list_camps_for_count(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    let camps = db.find_many(collections::CAMPS, doc! {}, None, None).await?;
    Ok(HttpResponse::Ok().json(camps))
}

#[utoipa::path(
    get,
    path = "/mostReg",
    tag = "Camps",
    responses((status = 200, description = "Camps by participantCount, descending"))
)]
pub async fn most_registered(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    list_ordered(&db, CampOrder::MostRegistered).await
}

#[utoipa::path(
    get,
    path = "/camp_fee",
    tag = "Camps",
    responses((status = 200, description = "Camps by campFee, descending"))
)]
pub async fn by_fee(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    list_ordered(&db, CampOrder::HighestFee).await
}

#[utoipa::path(
    get,
    path = "/Alphabetical_Order",
    tag = "Camps",
    responses((status = 200, description = "Camps by title, ascending"))
)]
pub async fn alphabetical(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    list_ordered(&db, CampOrder::Alphabetical).await
}

#[utoipa::path(
    get,
    path = "/camps/{id}",
    tag = "Camps",
    params(("id" = String, Path, description = "Camp ObjectId (24 hex chars)")),
    responses(
        (status = 200, description = "Camp document or null"),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn get_camp(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;
    let found = db.find_one(collections::CAMPS, doc! { "_id": id }).await?;
    Ok(HttpResponse::Ok().json(found))
}

#[utoipa::path(
    patch,
    path = "/campss/{id}",
    tag = "Camps",
    params(("id" = String, Path, description = "Camp ObjectId (24 hex chars)")),
    responses(
        (status = 200, description = "Merge-update acknowledgment", body = UpdateAck),
        (status = 400, description = "Malformed id or empty body")
    )
)]
pub async fn update_camp(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;
    let update = merge_update(body.into_inner())?;
    log::info!("✏️  PATCH /campss/{}", id);

    let ack = db
        .update_one(collections::CAMPS, doc! { "_id": id }, update)
        .await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    delete,
    path = "/camps/{id}",
    tag = "Camps",
    params(("id" = String, Path, description = "Camp ObjectId (24 hex chars)")),
    responses(
        (status = 200, description = "Delete acknowledgment (deletedCount may be 0)", body = DeleteAck),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn delete_camp(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;
    log::info!("🗑️  DELETE /camps/{}", id);

    let ack = db.delete_one(collections::CAMPS, doc! { "_id": id }).await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    get,
    path = "/camps-search/{value}",
    tag = "Camps",
    params(("value" = String, Path, description = "Text matched against title, campFee, startDate, loc and healtCareProf")),
    responses((status = 200, description = "Matching camps"))
)]
pub async fn search_camps(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let text = path.into_inner();
    log::debug!("🔎 GET /camps-search/{}", text);

    let camps = db
        .find_many(collections::CAMPS, camp::search_filter(&text), None, None)
        .await?;
    Ok(HttpResponse::Ok().json(camps))
}
