use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{AdminUser, Credentials};
use super::errors::AuthError;

/// Repository abstraction for admin accounts.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>, AuthError>;
    async fn create_admin(&self, email: &str, password_hash: String, password_algorithm: String) -> Result<AdminUser, AuthError>;
    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError>;
    async fn record_login(&self, user_id: Uuid) -> Result<(), AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, AdminUser>>, // key: email
        creds: Mutex<HashMap<Uuid, Credentials>>, // key: user_id
        logins: Mutex<Vec<Uuid>>,
    }

    impl MockAuthRepository {
        pub fn login_count(&self) -> usize { self.logins.lock().unwrap().len() }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(email).cloned())
        }

        async fn create_admin(&self, email: &str, password_hash: String, password_algorithm: String) -> Result<AdminUser, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(email) {
                return Err(AuthError::Conflict);
            }
            let user = AdminUser { id: Uuid::new_v4(), email: email.to_string() };
            users.insert(email.to_string(), user.clone());
            self.creds
                .lock()
                .unwrap()
                .insert(user.id, Credentials { user_id: user.id, password_hash, password_algorithm });
            Ok(user)
        }

        async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.lock().unwrap();
            Ok(creds.get(&user_id).cloned())
        }

        async fn record_login(&self, user_id: Uuid) -> Result<(), AuthError> {
            if !self.users.lock().unwrap().values().any(|u| u.id == user_id) {
                return Err(AuthError::NotFound);
            }
            self.logins.lock().unwrap().push(user_id);
            Ok(())
        }
    }
}
