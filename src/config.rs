use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::persistence::DEFAULT_NAMESPACE;

/// Where to look for configuration; unset fields use defaults
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Path to config file
    pub config: Option<PathBuf>,

    /// Path to data directory
    pub data_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct CatalogConfig {
    pub page_size: usize,
    /// Extra generated recipes ingested on top of the seed catalog
    pub generated_recipes: usize,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub path: Option<PathBuf>,
    pub namespace: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: 12,
            generated_recipes: 0,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load(options: &LoadOptions) -> anyhow::Result<Self> {
        let data_dir = Self::data_dir(options);
        let config_path = options
            .config
            .clone()
            .unwrap_or_else(|| data_dir.join("config.toml"));

        let mut config: Config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        anyhow::ensure!(
            config.catalog.page_size > 0,
            "catalog.page_size must be at least 1"
        );
        anyhow::ensure!(
            !config.storage.namespace.trim().is_empty(),
            "storage.namespace must not be empty"
        );

        // Resolve paths relative to data dir
        if config.storage.path.is_none() {
            config.storage.path = Some(data_dir.join("tastynest.db"));
        }

        Ok(config)
    }

    pub fn data_dir(options: &LoadOptions) -> PathBuf {
        options.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".tastynest")
        })
    }

    /// Set once `load` has resolved it
    pub fn db_path(&self) -> Option<&Path> {
        self.storage.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.catalog.page_size, 12);
        assert_eq!(config.catalog.generated_recipes, 0);
        assert_eq!(config.storage.namespace, "tastyNest");
        assert_eq!(config.logging.filter, "info");
        assert!(config.db_path().is_none());
    }

    #[test]
    fn data_dir_uses_override() {
        let options = LoadOptions {
            config: None,
            data_dir: Some(PathBuf::from("/tmp/test-tastynest")),
        };
        assert_eq!(
            Config::data_dir(&options),
            PathBuf::from("/tmp/test-tastynest")
        );
    }

    #[test]
    fn data_dir_defaults_to_dot_tastynest() {
        let dir = Config::data_dir(&LoadOptions::default());
        assert!(dir.ends_with(".tastynest"));
    }

    #[test]
    fn load_with_no_config_file_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let options = LoadOptions {
            config: None,
            data_dir: Some(tmp.path().to_path_buf()),
        };
        let config = Config::load(&options).unwrap();
        assert_eq!(config.catalog.page_size, 12);
        assert_eq!(config.db_path(), Some(tmp.path().join("tastynest.db").as_path()));
    }

    #[test]
    fn load_reads_toml_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(
            &config_path,
            r#"
[catalog]
page_size = 6
generated_recipes = 50

[storage]
namespace = "kitchen"

[logging]
filter = "tastynest=debug"
"#,
        )
        .unwrap();

        let options = LoadOptions {
            config: Some(config_path),
            data_dir: Some(tmp.path().to_path_buf()),
        };
        let config = Config::load(&options).unwrap();
        assert_eq!(config.catalog.page_size, 6);
        assert_eq!(config.catalog.generated_recipes, 50);
        assert_eq!(config.storage.namespace, "kitchen");
        assert_eq!(config.logging.filter, "tastynest=debug");
    }

    #[test]
    fn config_in_data_dir_is_picked_up() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("config.toml"),
            "[storage]\npath = \"/var/lib/tastynest/catalog.db\"\n",
        )
        .unwrap();

        let options = LoadOptions {
            config: None,
            data_dir: Some(tmp.path().to_path_buf()),
        };
        let config = Config::load(&options).unwrap();
        assert_eq!(
            config.db_path(),
            Some(Path::new("/var/lib/tastynest/catalog.db"))
        );
        assert_eq!(config.storage.namespace, "tastyNest");
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[catalog]\npage_size = 0\n").unwrap();

        let options = LoadOptions {
            config: Some(config_path),
            data_dir: Some(tmp.path().to_path_buf()),
        };
        assert!(Config::load(&options).is_err());
    }
}
