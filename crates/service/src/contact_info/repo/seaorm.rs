use async_trait::async_trait;
use chrono::Utc;
use models::contact_info;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::contact_info::domain::{ContactInfo, ContactInfoInput};
use crate::contact_info::repository::ContactInfoRepository;
use crate::errors::ServiceError;

pub struct SeaOrmContactInfoRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmContactInfoRepository {
    async fn current(&self) -> Result<Option<contact_info::Model>, ServiceError> {
        contact_info::Entity::find()
            .order_by_asc(contact_info::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(ServiceError::from_db)
    }
}

#[async_trait]
impl ContactInfoRepository for SeaOrmContactInfoRepository {
    async fn get(&self) -> Result<Option<ContactInfo>, ServiceError> {
        Ok(self.current().await?.map(ContactInfo::from))
    }

    async fn upsert(&self, input: ContactInfoInput) -> Result<ContactInfo, ServiceError> {
        let now = Utc::now().into();
        let saved = match self.current().await? {
            Some(existing) => {
                let mut am: contact_info::ActiveModel = existing.into();
                am.email = Set(input.email);
                am.phone = Set(input.phone);
                am.location = Set(input.location);
                am.availability = Set(input.availability);
                am.updated_at = Set(now);
                am.update(&self.db).await
            }
            None => {
                contact_info::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    email: Set(input.email),
                    phone: Set(input.phone),
                    location: Set(input.location),
                    availability: Set(input.availability),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&self.db)
                .await
            }
        }
        .map_err(ServiceError::from_db)?;
        Ok(saved.into())
    }
}
