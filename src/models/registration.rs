use mongodb::bson::{doc, Document};

/// Camp reference stored on a registration (the camp `_id` as hex text).
pub const REG_CAMP_ID: &str = "regCampId";
/// Participant reference shared by registrations and payment records.
pub const EMAIL_OF_PARTICIPANT: &str = "emailOfParticipant";

pub fn by_camp(reg_camp_id: &str) -> Document {
    doc! { REG_CAMP_ID: reg_camp_id }
}

pub fn by_participant(email: &str) -> Document {
    doc! { EMAIL_OF_PARTICIPANT: email }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_are_plain_equality() {
        assert_eq!(by_camp("6650c0ffee0000000000abcd"), doc! { "regCampId": "6650c0ffee0000000000abcd" });
        assert_eq!(by_participant("a@x.com"), doc! { "emailOfParticipant": "a@x.com" });
    }
}
