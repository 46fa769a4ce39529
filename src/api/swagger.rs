use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HealthBridge API",
        version = "1.0.0",
        description = "REST API of the HealthBridge medical-camp platform.\n\n**Authentication:** `POST /jwt` stores a signed token in the HTTP-only `token` cookie. `GET /verify` always requires it; write routes require it only when the server runs with `PROTECT_WRITES=true`.\n\nDocuments are schema-less: request bodies are stored as sent and responses return the stored documents with `_id` as a hex string."
    ),
    paths(
        // Health
        crate::api::health::liveness,
        crate::api::health::health_check,

        // Auth
        crate::api::auth::issue_token,
        crate::api::auth::logout,
        crate::api::auth::verify,

        // Payments
        crate::api::payments::create_payment_intent,

        // Users
        crate::api::users::list_users,
        crate::api::users::get_user_by_email,
        crate::api::users::create_user,

        // Camps
        crate::api::camps::create_camp,
        crate::api::camps::list_camps,
        crate::api::camps::list_camps_page,
        crate::api::camps::list_camps_for_count,
        crate::api::camps::most_registered,
        crate::api::camps::by_fee,
        crate::api::camps::alphabetical,
        crate::api::camps::get_camp,
        crate::api::camps::update_camp,
        crate::api::camps::delete_camp,
        crate::api::camps::search_camps,

        // Registrations
        crate::api::registrations::create_registration,
        crate::api::registrations::list_registrations,
        crate::api::registrations::registrations_for_camp,
        crate::api::registrations::get_registration,
        crate::api::registrations::update_registration,
        crate::api::registrations::delete_registration,
        crate::api::registrations::list_registrations_page,
        crate::api::registrations::participant_registrations,
        crate::api::registrations::participant_registrations_page,

        // Feedback
        crate::api::feedback::create_feedback,
        crate::api::feedback::list_feedback,
        crate::api::feedback::get_feedback,

        // Payment records
        crate::api::payment_info::create_payment_info,
        crate::api::payment_info::list_payment_info,
        crate::api::payment_info::get_payment_info,
        crate::api::payment_info::update_payment_info,
        crate::api::payment_info::participant_payments,
        crate::api::payment_info::participant_payments_page,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::InsertAck,
            crate::models::UpdateAck,
            crate::models::DeleteAck,
            crate::models::PaymentIntentRequest,
            crate::models::ClientSecretResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and database health."),
        (name = "Auth", description = "Token cookie issue, removal and verification."),
        (name = "Payments", description = "Payment intent creation through the payment provider."),
        (name = "Users", description = "User profiles, looked up by user_email."),
        (name = "Camps", description = "Medical camps: CRUD, sorted listings, pagination and search."),
        (name = "Registrations", description = "Participant registrations for camps."),
        (name = "Feedback", description = "Participant feedback, newest first."),
        (name = "PaymentInfo", description = "Payment records, updated by keyAfterPayment."),
    )
)]
pub struct ApiDoc;
