use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.web3forms.com/submit";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub relay: RelayConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4), static_dir: default_static_dir() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    #[serde(default)]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            auto_migrate: false,
        }
    }
}

/// Admin session settings. The bootstrap admin is created on startup when no admin exists yet.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
    #[serde(default)]
    pub cookie_secure: bool,
    #[serde(default)]
    pub admin_email: Option<String>,
    #[serde(default)]
    pub admin_password: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            session_ttl_hours: default_session_ttl_hours(),
            cookie_secure: false,
            admin_email: None,
            admin_password: None,
        }
    }
}

/// Outbound contact-form relay (Web3Forms compatible).
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_relay_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub access_key: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self { endpoint: default_relay_endpoint(), access_key: None }
    }
}

fn default_static_dir() -> String { "frontend".into() }
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_session_ttl_hours() -> i64 { 12 }
fn default_relay_endpoint() -> String { DEFAULT_RELAY_ENDPOINT.into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// 配置文件缺失时，完全依赖环境变量构建配置
    pub fn from_env() -> Result<Self> {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") { cfg.server.host = host; }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        cfg.database.auto_migrate = std::env::var("AUTO_MIGRATE").map(|v| v == "1" || v == "true").unwrap_or(false);
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Load `config.toml` when present, otherwise fall back to the environment.
    pub fn load() -> Result<Self> {
        match Self::load_and_validate() {
            Ok(cfg) => Ok(cfg),
            Err(e) if e.downcast_ref::<std::io::Error>().is_some() => Self::from_env(),
            Err(e) => Err(e),
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // 归一化 server
        self.server.normalize()?;
        // 归一化 database（支持从环境变量填充 URL）
        self.database.normalize_from_env();
        self.database.validate()?;
        self.auth.normalize_from_env();
        self.auth.validate()?;
        self.relay.normalize_from_env();
        self.relay.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port 必须在 1..=65535 范围内"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        if self.static_dir.trim().is_empty() {
            self.static_dir = default_static_dir();
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        // 若 TOML 中未提供 URL，则尝试从环境变量填充
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url 为空；请在 config.toml 或环境变量 DATABASE_URL 中提供"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url 必须以 postgresql:// 或 postgres:// 开头"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections 必须 >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections 必须 >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database 超时配置必须为正整数秒"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        if self.jwt_secret.trim().is_empty() {
            self.jwt_secret = std::env::var("JWT_SECRET").unwrap_or_default();
        }
        if self.admin_email.is_none() {
            self.admin_email = std::env::var("ADMIN_EMAIL").ok().filter(|v| !v.trim().is_empty());
        }
        if self.admin_password.is_none() {
            self.admin_password = std::env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            return Err(anyhow!("auth.jwt_secret 为空；请在 config.toml 或环境变量 JWT_SECRET 中提供"));
        }
        if self.session_ttl_hours <= 0 {
            return Err(anyhow!("auth.session_ttl_hours 必须为正整数"));
        }
        if self.admin_email.is_some() != self.admin_password.is_some() {
            return Err(anyhow!("auth.admin_email 与 auth.admin_password 必须同时提供"));
        }
        Ok(())
    }
}

impl RelayConfig {
    pub fn normalize_from_env(&mut self) {
        if self.access_key.as_deref().map(str::trim).unwrap_or("").is_empty() {
            self.access_key = std::env::var("WEB3FORMS_ACCESS_KEY").ok().filter(|v| !v.trim().is_empty());
        }
    }

    pub fn validate(&self) -> Result<()> {
        let lower = self.endpoint.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("relay.endpoint 必须以 http(s):// 开头"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[server]
host = "0.0.0.0"
port = 9000

[database]
url = "postgres://u:p@localhost:5432/folio"
auto_migrate = true

[auth]
jwt_secret = "s3cret"
admin_email = "owner@example.com"
admin_password = "ChangeMe123"

[relay]
access_key = "abc"
"#;

    #[test]
    fn parses_all_sections() {
        let mut cfg = parse(SAMPLE).unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.server.static_dir, "frontend");
        assert!(cfg.database.auto_migrate);
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.auth.session_ttl_hours, 12);
        assert_eq!(cfg.relay.endpoint, DEFAULT_RELAY_ENDPOINT);
        assert_eq!(cfg.relay.access_key.as_deref(), Some("abc"));
    }

    #[test]
    fn rejects_non_postgres_url() {
        let mut cfg = parse("[database]\nurl = \"mysql://localhost/db\"\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn admin_credentials_must_come_in_pairs() {
        let auth = AuthConfig { jwt_secret: "s".into(), admin_email: Some("a@b.c".into()), ..AuthConfig::default() };
        assert!(auth.validate().is_err());
    }

    #[test]
    fn missing_jwt_secret_is_rejected() {
        assert!(AuthConfig::default().validate().is_err());
        let blank = AuthConfig { jwt_secret: "   ".into(), ..AuthConfig::default() };
        assert!(blank.validate().is_err());
        let set = AuthConfig { jwt_secret: "s3cret".into(), ..AuthConfig::default() };
        assert!(set.validate().is_ok());
    }

    #[test]
    fn relay_endpoint_must_be_http() {
        let relay = RelayConfig { endpoint: "ftp://relay".into(), access_key: None };
        assert!(relay.validate().is_err());
    }
}
