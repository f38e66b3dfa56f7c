//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::warn;

/// Warn when the static frontend directory is missing; the JSON API still works without it.
pub async fn ensure_env(frontend_dir: &str) -> anyhow::Result<()> {
    match tokio::fs::metadata(frontend_dir).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(anyhow::anyhow!("{frontend_dir} exists but is not a directory")),
        Err(_) => {
            warn!(%frontend_dir, "frontend assets directory not found; static pages will 404");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_frontend_dir_is_only_a_warning() {
        let dir = std::env::temp_dir().join("folio_missing_frontend_dir_check");
        let _ = tokio::fs::remove_dir_all(&dir).await;
        assert!(ensure_env(dir.to_str().unwrap()).await.is_ok());
    }

    #[tokio::test]
    async fn file_in_place_of_frontend_dir_is_an_error() {
        let path = std::env::temp_dir().join(format!("folio_frontend_file_{}", std::process::id()));
        tokio::fs::write(&path, b"x").await.unwrap();
        assert!(ensure_env(path.to_str().unwrap()).await.is_err());
        let _ = tokio::fs::remove_file(&path).await;
    }
}
