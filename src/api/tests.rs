use actix_web::{
    body::MessageBody,
    cookie::Cookie,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    middleware::Condition,
    test, web, App, ResponseError,
};
use mongodb::bson::oid::ObjectId;
use serde_json::{json, Value};
use std::sync::Arc;

use super::configure;
use crate::config::{AppEnv, DatabaseConfig};
use crate::database::MongoDB;
use crate::middleware::TokenGuard;
use crate::services::payment_service::testing::RecordingProvider;
use crate::services::{PaymentProvider, TokenService};
use crate::utils::AppError;

const SECRET: &str = "test-access-token-secret";

/// Handle to a local MongoDB URI. The driver connects lazily, so routes that
/// fail before touching the database work without a server.
async fn offline_db() -> MongoDB {
    let client = mongodb::Client::with_uri_str("mongodb://127.0.0.1:27017")
        .await
        .unwrap();
    MongoDB::with_client(client, "healthbridge_offline_test")
}

macro_rules! test_app {
    ($db:expr, $provider:expr) => {
        test_app!($db, $provider, false)
    };
    ($db:expr, $provider:expr, $protect_writes:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($db))
                .app_data(web::Data::new(TokenService::new(SECRET, AppEnv::Development)))
                .app_data(web::Data::from($provider.clone() as Arc<dyn PaymentProvider>))
                .wrap(Condition::new($protect_writes, TokenGuard::writes()))
                .configure(configure),
        )
        .await
    };
}

/// Middleware rejections surface as `Err`, handler failures as error responses.
fn status_of<B>(result: Result<ServiceResponse<B>, actix_web::Error>) -> StatusCode {
    match result {
        Ok(resp) => resp.status(),
        Err(e) => e.as_response_error().status_code(),
    }
}

async fn json_body<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).unwrap()
}

fn token_cookie<B>(resp: &ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "token")
        .map(|c| c.into_owned())
        .expect("token cookie")
}

#[actix_web::test]
async fn test_liveness_is_plaintext() {
    let provider = Arc::new(RecordingProvider::default());
    let app = test_app!(offline_db().await, provider);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(body, "Server is running");
}

#[actix_web::test]
async fn test_jwt_cookie_round_trips_through_verify() {
    let provider = Arc::new(RecordingProvider::default());
    let app = test_app!(offline_db().await, provider);

    let identity = json!({ "email": "a@x.com", "name": "Participant A" });
    let req = test::TestRequest::post().uri("/jwt").set_json(&identity).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = token_cookie(&resp);
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(actix_web::cookie::SameSite::Strict));
    assert_eq!(json_body(resp).await, json!({ "success": true }));

    let req = test::TestRequest::get().uri("/verify").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, identity);
}

#[actix_web::test]
async fn test_verify_rejects_missing_and_tampered_tokens() {
    let provider = Arc::new(RecordingProvider::default());
    let app = test_app!(offline_db().await, provider);

    let req = test::TestRequest::get().uri("/verify").to_request();
    assert_eq!(status_of(app.call(req).await), StatusCode::UNAUTHORIZED);

    let forged = TokenService::new("some-other-secret", AppEnv::Development)
        .issue(json!({ "email": "a@x.com" }).as_object().unwrap().clone())
        .unwrap();
    let req = test::TestRequest::get()
        .uri("/verify")
        .cookie(Cookie::new("token", forged))
        .to_request();
    assert_eq!(status_of(app.call(req).await), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_logout_expires_cookie() {
    let provider = Arc::new(RecordingProvider::default());
    let app = test_app!(offline_db().await, provider);

    let resp = test::call_service(&app, test::TestRequest::post().uri("/logout").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = token_cookie(&resp);
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(actix_web::cookie::time::Duration::ZERO));
    assert_eq!(json_body(resp).await, json!({ "success": true }));
}

#[actix_web::test]
async fn test_payment_intent_returns_client_secret() {
    let provider = Arc::new(RecordingProvider::default());
    let app = test_app!(offline_db().await, provider);

    let req = test::TestRequest::post()
        .uri("/create-payment-intent")
        .set_json(json!({ "price": 12.5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!({ "clientSecret": "pi_test_1250_secret_abc" }));
    assert_eq!(*provider.calls.lock().unwrap(), vec![1250]);
}

#[actix_web::test]
async fn test_payment_intent_rejects_bad_prices_without_calling_provider() {
    let provider = Arc::new(RecordingProvider::default());
    let app = test_app!(offline_db().await, provider);

    for body in [
        json!({ "price": 0 }),
        json!({ "price": -3 }),
        json!({ "price": 0.005 }),
        json!({}),
        json!({ "price": "free" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/create-payment-intent")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body {}", body);

        let json = json_body(resp).await;
        assert_eq!(json["success"], false);
        assert!(json.get("clientSecret").is_none());
    }

    assert!(provider.calls.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn test_malformed_ids_are_bad_requests() {
    let provider = Arc::new(RecordingProvider::default());
    let app = test_app!(offline_db().await, provider);

    for (method, uri) in [
        ("GET", "/camps/not-an-id"),
        ("DELETE", "/camps/12345"),
        ("GET", "/regCamps_default/xyz"),
        ("DELETE", "/regCamps/xyz"),
        ("GET", "/feedback/zzz"),
        ("GET", "/paymentInfo/zzz"),
    ] {
        let req = match method {
            "GET" => test::TestRequest::get(),
            _ => test::TestRequest::delete(),
        }
        .uri(uri)
        .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{} {}", method, uri);

        let json = json_body(resp).await;
        assert!(json["error"].as_str().unwrap().starts_with("invalid id: "));
    }
}

#[actix_web::test]
async fn test_bad_bodies_and_queries_are_bad_requests() {
    let provider = Arc::new(RecordingProvider::default());
    let app = test_app!(offline_db().await, provider);

    let req = test::TestRequest::post()
        .uri("/camps")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post().uri("/user").set_json(json!("a@x.com")).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::patch()
        .uri(&format!("/campss/{}", ObjectId::new().to_hex()))
        .set_json(json!({}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/campsDataPagination?page=first&size=5")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["success"], false);
}

#[actix_web::test]
async fn test_zero_page_size_is_empty_without_database() {
    let provider = Arc::new(RecordingProvider::default());
    let app = test_app!(offline_db().await, provider);

    for uri in [
        "/campsDataPagination?page=0&size=0",
        "/regCampsPagination?size=0",
        "/myRegCamps/a@x.com?page=3&size=0",
        "/paymentInfoByCount/a@x.com?size=0",
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {}", uri);
        assert_eq!(json_body(resp).await, json!([]), "GET {}", uri);
    }
}

#[actix_web::test]
async fn test_protected_writes_need_token() {
    let provider = Arc::new(RecordingProvider::default());
    let app = test_app!(offline_db().await, provider, true);

    // reads stay open
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/create-payment-intent")
        .set_json(json!({ "price": 5 }))
        .to_request();
    assert_eq!(status_of(app.call(req).await), StatusCode::UNAUTHORIZED);
    assert!(provider.calls.lock().unwrap().is_empty());

    // the token endpoint itself stays reachable
    let req = test::TestRequest::post()
        .uri("/jwt")
        .set_json(json!({ "email": "a@x.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = token_cookie(&resp);

    let req = test::TestRequest::post()
        .uri("/create-payment-intent")
        .cookie(cookie)
        .set_json(json!({ "price": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(*provider.calls.lock().unwrap(), vec![500]);
}

#[::core::prelude::v1::test]
fn test_app_error_into_actix_error_keeps_status() {
    let err: actix_web::Error = AppError::Unauthorized("missing token cookie".into()).into();
    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
}

// ==================== live MongoDB ====================

/// Fresh database per test, dropped at the end.
async fn live_db() -> MongoDB {
    dotenv::dotenv().ok();
    let config = DatabaseConfig {
        uri: std::env::var("DATABASE_URL").unwrap_or_else(|_| "mongodb://127.0.0.1:27017".to_string()),
        name: format!("healthbridge_test_{}", ObjectId::new().to_hex()),
        max_pool_size: 5,
    };
    MongoDB::connect(&config).await.unwrap()
}

macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr) => {{
        let req = test::TestRequest::post().uri($uri).set_json($body).to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "POST {}", $uri);
        json_body(resp).await
    }};
}

macro_rules! get_json {
    ($app:expr, $uri:expr) => {{
        let resp = test::call_service(&$app, test::TestRequest::get().uri($uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {}", $uri);
        json_body(resp).await
    }};
}

fn titles(camps: &Value) -> Vec<String> {
    camps
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap().to_string())
        .collect()
}

#[actix_web::test]
#[ignore] // Requires MongoDB to be running
async fn test_live_camp_insert_then_get() {
    let db = live_db().await;
    let provider = Arc::new(RecordingProvider::default());
    let app = test_app!(db.clone(), provider);

    let camp = json!({ "title": "Flu Shot", "campFee": 10, "participantCount": 0, "loc": "Dhaka" });
    let ack = post_json!(app, "/camps", camp.clone());
    assert_eq!(ack["acknowledged"], true);
    let id = ack["insertedId"].as_str().unwrap().to_string();

    let mut expected = camp;
    expected["_id"] = json!(id);
    assert_eq!(get_json!(app, &format!("/camps/{}", id)), expected);

    // missing ids read as null
    assert_eq!(get_json!(app, &format!("/camps/{}", ObjectId::new().to_hex())), Value::Null);

    db.database().drop().await.unwrap();
}

#[actix_web::test]
#[ignore] // Requires MongoDB to be running
async fn test_live_camp_orderings() {
    let db = live_db().await;
    let provider = Arc::new(RecordingProvider::default());
    let app = test_app!(db.clone(), provider);

    for (title, fee, count) in [("Dental", 30, 4), ("Flu Shot", 10, 9), ("Blood Drive", 0, 1), ("Eye Camp", 25, 7)] {
        post_json!(app, "/camps", json!({ "title": title, "campFee": fee, "participantCount": count }));
    }

    assert_eq!(
        titles(&get_json!(app, "/camps")),
        vec!["Eye Camp", "Blood Drive", "Flu Shot", "Dental"]
    );
    assert_eq!(
        titles(&get_json!(app, "/Alphabetical_Order")),
        vec!["Blood Drive", "Dental", "Eye Camp", "Flu Shot"]
    );
    assert_eq!(
        titles(&get_json!(app, "/camp_fee")),
        vec!["Dental", "Eye Camp", "Flu Shot", "Blood Drive"]
    );
    assert_eq!(
        titles(&get_json!(app, "/mostReg")),
        vec!["Flu Shot", "Eye Camp", "Dental", "Blood Drive"]
    );
    assert_eq!(get_json!(app, "/campsDataLengthPagination").as_array().unwrap().len(), 4);

    assert_eq!(titles(&get_json!(app, "/camps-search/EYE")), vec!["Eye Camp"]);
    assert!(get_json!(app, "/camps-search/.*").as_array().unwrap().is_empty());

    db.database().drop().await.unwrap();
}

#[actix_web::test]
#[ignore] // Requires MongoDB to be running
async fn test_live_pages_concatenate_to_full_listing() {
    let db = live_db().await;
    let provider = Arc::new(RecordingProvider::default());
    let app = test_app!(db.clone(), provider);

    for i in 0..7 {
        post_json!(app, "/camps", json!({ "title": format!("Camp {}", i) }));
    }

    let full = get_json!(app, "/camps");
    let mut paged = Vec::new();
    for page in 0..4 {
        let chunk = get_json!(app, &format!("/campsDataPagination?page={}&size=3", page));
        let chunk = chunk.as_array().unwrap().clone();
        assert!(chunk.len() <= 3);
        paged.extend(chunk);
    }

    assert_eq!(Value::Array(paged), full);

    db.database().drop().await.unwrap();
}

#[actix_web::test]
#[ignore] // Requires MongoDB to be running
async fn test_live_delete_missing_is_zero_count() {
    let db = live_db().await;
    let provider = Arc::new(RecordingProvider::default());
    let app = test_app!(db.clone(), provider);

    let req = test::TestRequest::delete()
        .uri(&format!("/camps/{}", ObjectId::new().to_hex()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!({ "acknowledged": true, "deletedCount": 0 }));

    db.database().drop().await.unwrap();
}

#[actix_web::test]
#[ignore] // Requires MongoDB to be running
async fn test_live_user_lookup_and_registrations() {
    let db = live_db().await;
    let provider = Arc::new(RecordingProvider::default());
    let app = test_app!(db.clone(), provider);

    let ack = post_json!(app, "/user", json!({ "user_email": "a@x.com" }));
    let user = get_json!(app, "/user/a@x.com");
    assert_eq!(user, json!({ "_id": ack["insertedId"], "user_email": "a@x.com" }));
    assert_eq!(get_json!(app, "/user/nobody@x.com"), Value::Null);

    let camp_id = ObjectId::new().to_hex();
    for _ in 0..3 {
        post_json!(app, "/regCamps", json!({ "regCampId": camp_id, "emailOfParticipant": "a@x.com" }));
    }
    post_json!(app, "/regCamps", json!({ "regCampId": "other", "emailOfParticipant": "b@x.com" }));

    assert_eq!(get_json!(app, &format!("/regCamps/{}", camp_id)).as_array().unwrap().len(), 3);
    assert_eq!(get_json!(app, "/myRegCampsCount/a@x.com").as_array().unwrap().len(), 3);
    assert_eq!(get_json!(app, "/myRegCamps/a@x.com?page=1&size=2").as_array().unwrap().len(), 1);
    assert_eq!(get_json!(app, "/regCampsPagination?page=0&size=10").as_array().unwrap().len(), 4);

    db.database().drop().await.unwrap();
}

#[actix_web::test]
#[ignore] // Requires MongoDB to be running
async fn test_live_payment_key_is_unique() {
    let db = live_db().await;
    let provider = Arc::new(RecordingProvider::default());
    let app = test_app!(db.clone(), provider);

    post_json!(app, "/paymentInfo", json!({ "emailOfParticipant": "a@x.com", "keyAfterPayment": "k-1", "status": "pending" }));

    let req = test::TestRequest::post()
        .uri("/paymentInfo")
        .set_json(json!({ "emailOfParticipant": "b@x.com", "keyAfterPayment": "k-1" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::put()
        .uri("/paymentInfo_up/k-1")
        .set_json(json!({ "status": "confirmed" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let ack = json_body(resp).await;
    assert_eq!(ack["matchedCount"], 1);
    assert_eq!(ack["modifiedCount"], 1);

    let records = get_json!(app, "/paymentInfoBy/a@x.com");
    assert_eq!(records[0]["status"], "confirmed");

    db.database().drop().await.unwrap();
}

#[actix_web::test]
#[ignore] // Requires MongoDB to be running
async fn test_live_huge_page_number_is_empty() {
    let db = live_db().await;
    let provider = Arc::new(RecordingProvider::default());
    let app = test_app!(db.clone(), provider);

    post_json!(app, "/camps", json!({ "title": "Only Camp" }));

    let page = get_json!(app, "/campsDataPagination?page=9223372036854775807&size=10");
    assert_eq!(page, json!([]));
    let page = get_json!(app, &format!("/campsDataPagination?page={}&size=50", u64::MAX));
    assert_eq!(page, json!([]));

    db.database().drop().await.unwrap();
}

#[actix_web::test]
#[ignore] // Requires MongoDB to be running
async fn test_live_feedback_newest_first() {
    let db = live_db().await;
    let provider = Arc::new(RecordingProvider::default());
    let app = test_app!(db.clone(), provider);

    let mut ids = Vec::new();
    for rating in 1..=3 {
        let ack = post_json!(app, "/feedback", json!({ "emailOfParticipant": "a@x.com", "rating": rating }));
        ids.push(ack["insertedId"].clone());
    }

    let listed = get_json!(app, "/feedback");
    let listed_ids: Vec<Value> = listed.as_array().unwrap().iter().map(|f| f["_id"].clone()).collect();
    ids.reverse();
    assert_eq!(listed_ids, ids);
    assert_eq!(listed[0]["rating"], 3);

    let one = get_json!(app, &format!("/feedback/{}", ids[1].as_str().unwrap()));
    assert_eq!(one["rating"], 2);

    db.database().drop().await.unwrap();
}
