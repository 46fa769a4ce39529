pub mod auth;
pub mod camps;
pub mod feedback;
pub mod health;
pub mod payment_info;
pub mod payments;
pub mod registrations;
pub mod swagger;
pub mod users;

use actix_web::web;

use crate::middleware::TokenGuard;
use crate::utils::AppError;

/// Malformed bodies and query strings go through the same error contract as handler failures.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::InvalidRequest(format!("Invalid JSON body: {}", err)).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::InvalidRequest(format!("Invalid query string: {}", err)).into()
    })
}

/// Registers every route. Expects `web::Data` for `MongoDB`, `TokenService`
/// and `dyn PaymentProvider` on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        // Health
        .route("/", web::get().to(health::liveness))
        .route("/health", web::get().to(health::health_check))
        // Auth
        .route("/jwt", web::post().to(auth::issue_token))
        .route("/logout", web::post().to(auth::logout))
        .service(
            web::resource("/verify")
                .wrap(TokenGuard::all())
                .route(web::get().to(auth::verify)),
        )
        // Payments
        .route("/create-payment-intent", web::post().to(payments::create_payment_intent))
        // Users
        .service(
            web::resource("/user")
                .route(web::get().to(users::list_users))
                .route(web::post().to(users::create_user)),
        )
        .route("/user/{email}", web::get().to(users::get_user_by_email))
        // Camps
        .service(
            web::resource("/camps")
                .route(web::get().to(camps::list_camps))
                .route(web::post().to(camps::create_camp)),
        )
        .route("/campsDataPagination", web::get().to(camps::list_camps_page))
        .route("/campsDataLengthPagination", web::get().to(camps::list_camps_for_count))
        .route("/mostReg", web::get().to(camps::most_registered))
        .route("/camp_fee", web::get().to(camps::by_fee))
        .route("/Alphabetical_Order", web::get().to(camps::alphabetical))
        .service(
            web::resource("/camps/{id}")
                .route(web::get().to(camps::get_camp))
                .route(web::delete().to(camps::delete_camp)),
        )
        .route("/campss/{id}", web::patch().to(camps::update_camp))
        .route("/camps-search/{value}", web::get().to(camps::search_camps))
        // Registrations
        .service(
            web::resource("/regCamps")
                .route(web::get().to(registrations::list_registrations))
                .route(web::post().to(registrations::create_registration)),
        )
        .service(
            // GET reads the segment as a camp reference, DELETE as a registration id
            web::resource("/regCamps/{key}")
                .route(web::get().to(registrations::registrations_for_camp))
                .route(web::delete().to(registrations::delete_registration)),
        )
        .service(
            web::resource("/regCamps_default/{id}")
                .route(web::get().to(registrations::get_registration))
                .route(web::put().to(registrations::update_registration)),
        )
        .route("/regCampsPagination", web::get().to(registrations::list_registrations_page))
        .route("/myRegCampsCount/{email}", web::get().to(registrations::participant_registrations))
        .route("/myRegCamps/{email}", web::get().to(registrations::participant_registrations_page))
        // Feedback
        .service(
            web::resource("/feedback")
                .route(web::get().to(feedback::list_feedback))
                .route(web::post().to(feedback::create_feedback)),
        )
        .route("/feedback/{id}", web::get().to(feedback::get_feedback))
        // Payment records
        .service(
            web::resource("/paymentInfo")
                .route(web::get().to(payment_info::list_payment_info))
                .route(web::post().to(payment_info::create_payment_info)),
        )
        .route("/paymentInfo/{id}", web::get().to(payment_info::get_payment_info))
        .route("/paymentInfo_up/{id}", web::put().to(payment_info::update_payment_info))
        .route("/paymentInfoBy/{email}", web::get().to(payment_info::participant_payments))
        .route("/paymentInfoByCount/{email}", web::get().to(payment_info::participant_payments_page));
}

#[cfg(test)]
mod tests;
