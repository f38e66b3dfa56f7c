use chrono::Utc;
use models::admin_user;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set, SqlErr};
use uuid::Uuid;

use crate::auth::domain::{AdminUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>, AuthError> {
        let res = admin_user::Entity::find()
            .filter(admin_user::Column::Email.eq(email.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|u| AdminUser { id: u.id, email: u.email }))
    }

    async fn create_admin(&self, email: &str, password_hash: String, password_algorithm: String) -> Result<AdminUser, AuthError> {
        let am = admin_user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            password_algorithm: Set(password_algorithm),
            last_login_at: Set(None),
            created_at: Set(Utc::now().into()),
        };
        let created = am.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AuthError::Conflict,
            _ => AuthError::Repository(e.to_string()),
        })?;
        Ok(AdminUser { id: created.id, email: created.email })
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let res = admin_user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|u| Credentials { user_id: u.id, password_hash: u.password_hash, password_algorithm: u.password_algorithm }))
    }

    async fn record_login(&self, user_id: Uuid) -> Result<(), AuthError> {
        let am = admin_user::ActiveModel {
            id: Set(user_id),
            last_login_at: Set(Some(Utc::now().into())),
            ..Default::default()
        };
        am.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => AuthError::NotFound,
            other => AuthError::Repository(other.to_string()),
        })?;
        Ok(())
    }
}
