use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};
use service::auth::{repo::SeaOrmAuthRepository, service::AuthConfig, AuthService};
use service::contact::ContactRelay;
use service::contact_info::{repo::SeaOrmContactInfoRepository, ContactInfoService};
use service::ordered::repo::SeaOrmOrderedRepository;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Wire SeaORM repositories, the auth service and the relay into handler state.
pub fn build_state(db: DatabaseConnection, cfg: &AppConfig) -> ServerState {
    ServerState {
        records: Arc::new(SeaOrmOrderedRepository::new(db.clone())),
        contact_info: ContactInfoService::new(Arc::new(SeaOrmContactInfoRepository { db: db.clone() })),
        auth: AuthService::new(Arc::new(SeaOrmAuthRepository { db }), AuthConfig::from(&cfg.auth)),
        relay: ContactRelay::new(&cfg.relay),
        cookie_secure: cfg.auth.cookie_secure,
    }
}

async fn bootstrap_admin(state: &ServerState, cfg: &AppConfig) -> anyhow::Result<()> {
    let (Some(email), Some(password)) = (&cfg.auth.admin_email, &cfg.auth.admin_password) else {
        return Ok(());
    };
    match state.auth.bootstrap_admin(email, password).await {
        Ok(Some(user)) => info!(user_id = %user.id, "admin account created from config"),
        Ok(None) => info!("admin account already present"),
        Err(e) => return Err(anyhow::anyhow!("admin bootstrap failed: {e}")),
    }
    Ok(())
}

/// Public entry: build the app from `cfg` and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    common::env::ensure_env(&cfg.server.static_dir).await?;

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("migrations applied");
    }

    let state = build_state(db, &cfg);
    bootstrap_admin(&state, &cfg).await?;
    if !state.relay.is_configured() {
        warn!("relay access key missing; contact form submissions will fail");
    }

    let app: Router = routes::build_router(state, build_cors(), &cfg.server.static_dir);

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting server crate");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

