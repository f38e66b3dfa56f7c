use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Contact form as posted by the site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub message: String,
}

impl ContactSubmission {
    pub fn validate(&self) -> Result<(), ServiceError> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect();
        if !missing.is_empty() {
            return Err(ServiceError::Validation(format!("Missing required fields: {}", missing.join(", "))));
        }
        Ok(())
    }

    pub fn relay_message(&self) -> String {
        format!("Service: {}\nBudget: {}\n\n{}", self.service, self.budget, self.message)
    }

    pub fn relay_subject(&self) -> String {
        format!("New {} Inquiry - {}", self.service, self.budget)
    }
}

/// JSON body understood by the relay (Web3Forms field names).
#[derive(Debug, Clone, Serialize)]
pub struct RelayPayload<'a> {
    pub access_key: &'a str,
    pub email: &'a str,
    pub name: &'a str,
    pub phone: &'a str,
    pub message: String,
    pub subject: String,
    pub from_name: &'a str,
    pub replyto: &'a str,
}

impl<'a> RelayPayload<'a> {
    pub fn new(access_key: &'a str, s: &'a ContactSubmission) -> Self {
        Self {
            access_key,
            email: &s.email,
            name: &s.name,
            phone: &s.phone,
            message: s.relay_message(),
            subject: s.relay_subject(),
            from_name: &s.name,
            replyto: &s.email,
        }
    }
}
