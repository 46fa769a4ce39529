use mongodb::bson::{doc, Document, Regex};

/// Field names of the `Camps` collection the server filters or sorts on.
pub mod fields {
    pub const TITLE: &str = "title";
    pub const CAMP_FEE: &str = "campFee";
    pub const START_DATE: &str = "startDate";
    pub const LOCATION: &str = "loc";
    pub const HEALTHCARE_PROFESSIONAL: &str = "healtCareProf";
    pub const PARTICIPANT_COUNT: &str = "participantCount";
}

/// Listing orders exposed by the camp endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampOrder {
    /// `_id` descending (ObjectIds grow with insertion time)
    Newest,
    MostRegistered,
    HighestFee,
    Alphabetical,
}

impl CampOrder {
    pub fn sort(self) -> Document {
        match self {
            CampOrder::Newest => doc! { "_id": -1 },
            CampOrder::MostRegistered => doc! { fields::PARTICIPANT_COUNT: -1 },
            CampOrder::HighestFee => doc! { fields::CAMP_FEE: -1 },
            CampOrder::Alphabetical => doc! { fields::TITLE: 1 },
        }
    }
}

/// `$or` of regex matches over the searchable camp fields. The text is
/// matched literally; `campFee` is matched case-sensitively.
pub fn search_filter(text: &str) -> Document {
    let pattern = regex::escape(text);
    let insensitive = |field: &str| doc! { field: Regex { pattern: pattern.clone(), options: "i".to_string() } };

    doc! {
        "$or": [
            insensitive(fields::TITLE),
            { fields::CAMP_FEE: Regex { pattern: pattern.clone(), options: String::new() } },
            insensitive(fields::START_DATE),
            insensitive(fields::LOCATION),
            insensitive(fields::HEALTHCARE_PROFESSIONAL),
        ]
    }
}
