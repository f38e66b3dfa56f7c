use async_trait::async_trait;

use super::domain::{ContactInfo, ContactInfoInput};
use crate::errors::ServiceError;

#[async_trait]
pub trait ContactInfoRepository: Send + Sync {
    async fn get(&self) -> Result<Option<ContactInfo>, ServiceError>;
    /// Update the existing row, or insert the first one.
    async fn upsert(&self, input: ContactInfoInput) -> Result<ContactInfo, ServiceError>;
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    use chrono::Utc;

    #[derive(Default)]
    pub struct MockContactInfoRepository {
        row: Mutex<Option<ContactInfo>>,
    }

    #[async_trait]
    impl ContactInfoRepository for MockContactInfoRepository {
        async fn get(&self) -> Result<Option<ContactInfo>, ServiceError> {
            Ok(self.row.lock().unwrap().clone())
        }

        async fn upsert(&self, input: ContactInfoInput) -> Result<ContactInfo, ServiceError> {
            let info = ContactInfo {
                email: input.email,
                phone: input.phone,
                location: input.location,
                availability: input.availability,
                updated_at: Utc::now(),
            };
            *self.row.lock().unwrap() = Some(info.clone());
            Ok(info)
        }
    }
}
