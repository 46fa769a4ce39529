pub mod acknowledgment;
pub mod camp;
pub mod pagination;
pub mod payment;
pub mod registration;
pub mod user;

pub use acknowledgment::*;
pub use camp::CampOrder;
pub use pagination::*;
pub use payment::{ClientSecretResponse, PaymentIntentRequest};
