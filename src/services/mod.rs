pub mod payment_service;
pub mod token_service;

pub use payment_service::{PaymentProvider, StripeClient};
pub use token_service::TokenService;
