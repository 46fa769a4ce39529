pub mod auth;

pub use auth::{TokenGuard, VerifiedPayload};
