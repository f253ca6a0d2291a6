mod file_config;

pub use file_config::{CatalogFileConfig, FileConfig};

use anyhow::{bail, Result};
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "https://exercisedb.p.rapidapi.com";
pub const DEFAULT_API_HOST: &str = "exercisedb.p.rapidapi.com";
pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_FETCH_TIMEOUT_SEC: u64 = 30;

/// Environment variable consulted for the catalog API credential when
/// neither CLI nor config file provide one.
pub const API_KEY_ENV_VAR: &str = "FITZONE_API_KEY";

/// CLI arguments that take part in config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_path: Option<PathBuf>,
    pub ephemeral: bool,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Store database file. None means an ephemeral in-memory store.
    pub db_path: Option<PathBuf>,

    /// Catalog API credential. Only needed by catalog commands; resolved
    /// lazily so purely local operations work without one.
    pub api_key: Option<String>,

    pub api_base_url: String,
    pub api_host: String,
    pub page_size: usize,
    pub fetch_timeout_sec: u64,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present; the API key falls back
    /// to the `FITZONE_API_KEY` environment variable.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = if cli.ephemeral {
            None
        } else {
            let path = file
                .db_path
                .map(PathBuf::from)
                .or_else(|| cli.db_path.clone());
            match path {
                Some(path) => {
                    if path.is_dir() {
                        bail!("db path is a directory, expected a file: {:?}", path);
                    }
                    Some(path)
                }
                None => bail!(
                    "db path must be specified via --db or in the config file \
                     (or pass --ephemeral for an in-memory session)"
                ),
            }
        };

        let api_key = file
            .api_key
            .or_else(|| cli.api_key.clone())
            .or_else(|| std::env::var(API_KEY_ENV_VAR).ok());

        let catalog = file.catalog.unwrap_or_default();

        Ok(Self {
            db_path,
            api_key,
            api_base_url: catalog
                .base_url
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            api_host: catalog
                .api_host
                .unwrap_or_else(|| DEFAULT_API_HOST.to_string()),
            page_size: catalog.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            fetch_timeout_sec: catalog
                .fetch_timeout_sec
                .unwrap_or(DEFAULT_FETCH_TIMEOUT_SEC),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_cli_only() {
        let cli = CliConfig {
            db_path: Some(PathBuf::from("/tmp/fitzone.db")),
            ephemeral: false,
            api_key: Some("cli-key".to_string()),
        };

        let config = AppConfig::resolve(&cli, None).unwrap();

        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/fitzone.db")));
        assert_eq!(config.api_key.as_deref(), Some("cli-key"));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.api_host, DEFAULT_API_HOST);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.fetch_timeout_sec, DEFAULT_FETCH_TIMEOUT_SEC);
    }

    #[test]
    fn test_resolve_toml_overrides_cli() {
        let cli = CliConfig {
            db_path: Some(PathBuf::from("/cli/fitzone.db")),
            ephemeral: false,
            api_key: Some("cli-key".to_string()),
        };

        let file_config = FileConfig {
            db_path: Some("/toml/fitzone.db".to_string()),
            api_key: Some("toml-key".to_string()),
            catalog: Some(CatalogFileConfig {
                base_url: Some("https://example.test".to_string()),
                api_host: Some("example.test".to_string()),
                page_size: Some(25),
                fetch_timeout_sec: Some(5),
            }),
        };

        let config = AppConfig::resolve(&cli, Some(file_config)).unwrap();

        assert_eq!(config.db_path, Some(PathBuf::from("/toml/fitzone.db")));
        assert_eq!(config.api_key.as_deref(), Some("toml-key"));
        assert_eq!(config.api_base_url, "https://example.test");
        assert_eq!(config.api_host, "example.test");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.fetch_timeout_sec, 5);
    }

    #[test]
    fn test_resolve_missing_db_path_error() {
        let cli = CliConfig::default();
        let result = AppConfig::resolve(&cli, None);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("db path must be specified"));
    }

    #[test]
    fn test_resolve_ephemeral_needs_no_db_path() {
        let cli = CliConfig {
            ephemeral: true,
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli, None).unwrap();
        assert!(config.db_path.is_none());
    }

    #[test]
    fn test_resolve_rejects_directory_db_path() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let cli = CliConfig {
            db_path: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };

        let result = AppConfig::resolve(&cli, None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("directory"));
    }

    #[test]
    fn test_file_config_parses_toml() {
        let toml_str = r#"
            db_path = "/data/fitzone.db"

            [catalog]
            page_size = 50
        "#;
        let file: FileConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(file.db_path.as_deref(), Some("/data/fitzone.db"));
        assert!(file.api_key.is_none());
        assert_eq!(file.catalog.unwrap().page_size, Some(50));
    }
}
