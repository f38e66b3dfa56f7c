use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Connection-level failures become `StoreUnavailable`, everything else `Db`.
    pub fn from_db(e: DbErr) -> Self {
        match e {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Self::StoreUnavailable(e.to_string()),
            other => Self::Db(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnAcquireErr, RuntimeErr};

    #[test]
    fn connection_errors_map_to_unavailable() {
        let e = ServiceError::from_db(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout));
        assert!(matches!(e, ServiceError::StoreUnavailable(_)));
        let e = ServiceError::from_db(DbErr::Conn(RuntimeErr::Internal("refused".into())));
        assert!(matches!(e, ServiceError::StoreUnavailable(_)));
        let e = ServiceError::from_db(DbErr::RecordNotInserted);
        assert!(matches!(e, ServiceError::Db(_)));
    }
}
