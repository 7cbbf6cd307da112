//! Marketplace configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.skillmart/` unless
//! `SKILLMART_DATA_DIR` is set) into [`MarketplaceConfig`]. Falls back to
//! defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use skillmart_types::config::MarketplaceConfig;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "SKILLMART_DATA_DIR";

/// Resolve the data directory: `$SKILLMART_DATA_DIR`, else `~/.skillmart`,
/// else `./.skillmart` when no home directory is known.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".skillmart")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`MarketplaceConfig::default()`].
/// - Unreadable or unparsable file: a warning is logged and defaults are used.
/// - Values that fail [`MarketplaceConfig::validate`] are rejected the same way.
pub async fn load_config(data_dir: &Path) -> MarketplaceConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return MarketplaceConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return MarketplaceConfig::default();
        }
    };

    let config = match toml::from_str::<MarketplaceConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            return MarketplaceConfig::default();
        }
    };

    if let Err(reason) = config.validate() {
        tracing::warn!("{}: {reason}, using defaults", config_path.display());
        return MarketplaceConfig::default();
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config, MarketplaceConfig::default());
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
default_currency = "GBP"

[fees]
platform_fee_rate = "0.10"

[readiness]
min_ai_score = 80
min_portfolio_items = 2
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.default_currency, "GBP");
        assert_eq!(config.fees.platform_fee_rate, dec!(0.10));
        assert_eq!(config.readiness.min_ai_score, 80);
        assert_eq!(config.readiness.min_content_quality, 70);
        assert_eq!(config.readiness.min_portfolio_items, 2);
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();
        assert_eq!(load_config(tmp.path()).await, MarketplaceConfig::default());
    }

    #[tokio::test]
    async fn load_config_out_of_range_rate_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            "[fees]\nplatform_fee_rate = \"2\"\n",
        )
        .await
        .unwrap();
        assert_eq!(load_config(tmp.path()).await, MarketplaceConfig::default());
    }
}
