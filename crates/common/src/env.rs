//! Environment/runtime helpers
//!
//! Sanity checks run before the server binds.

use std::path::Path;

use tracing::info;

/// Ensure the parent directory of a file-backed SQLite database exists.
///
/// Postgres URLs and in-memory SQLite need nothing on disk, so they pass through.
pub async fn ensure_database_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(path) = sqlite_file_path(database_url) else {
        return Ok(());
    };
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
        info!(dir = %parent.display(), "sqlite data directory ready");
    }
    Ok(())
}

fn sqlite_file_path(url: &str) -> Option<&str> {
    let rest = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_paths() {
        assert_eq!(sqlite_file_path("sqlite://data/banners.db?mode=rwc"), Some("data/banners.db"));
        assert_eq!(sqlite_file_path("sqlite:banners.db"), Some("banners.db"));
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/banners"), None);
    }

    #[tokio::test]
    async fn creates_parent_dir_for_sqlite_file() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("banners_env_{}", uuid::Uuid::new_v4()));
        let url = format!("sqlite://{}/nested/banners.db?mode=rwc", dir.display());
        ensure_database_dir(&url).await?;
        assert!(tokio::fs::metadata(dir.join("nested")).await?.is_dir());
        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
