use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{ContactInfo, ContactInfoInput};
use super::repository::ContactInfoRepository;
use crate::errors::ServiceError;

/// Validates contact details before they reach the store.
#[derive(Clone)]
pub struct ContactInfoService {
    repo: Arc<dyn ContactInfoRepository>,
}

impl ContactInfoService {
    pub fn new(repo: Arc<dyn ContactInfoRepository>) -> Self { Self { repo } }

    pub async fn get(&self) -> Result<Option<ContactInfo>, ServiceError> {
        self.repo.get().await
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn save(&self, mut input: ContactInfoInput) -> Result<ContactInfo, ServiceError> {
        input.email = input.email.trim().to_string();
        models::contact_info::validate_email(&input.email)?;
        if input.phone.trim().is_empty() {
            return Err(ServiceError::Validation("phone is required".into()));
        }
        if input.location.trim().is_empty() {
            return Err(ServiceError::Validation("location is required".into()));
        }
        input.availability = input.availability.filter(|a| !a.trim().is_empty());
        let saved = self.repo.upsert(input).await?;
        info!("contact_info_saved");
        Ok(saved)
    }
}
