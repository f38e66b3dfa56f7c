use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub location: String,
    pub availability: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::contact_info::Model> for ContactInfo {
    fn from(m: models::contact_info::Model) -> Self {
        Self {
            email: m.email,
            phone: m.phone,
            location: m.location,
            availability: m.availability,
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfoInput {
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(default)]
    pub availability: Option<String>,
}
