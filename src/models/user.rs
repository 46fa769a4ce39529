use mongodb::bson::{doc, Document};

/// Lookup key of the `Users` collection. Not unique.
pub const USER_EMAIL: &str = "user_email";

pub fn by_email(email: &str) -> Document {
    doc! { USER_EMAIL: email }
}
