//! Configuration management for quarry.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for quarry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directories whose documents are indexed.
    pub index_roots: Vec<PathBuf>,

    /// Path components to exclude from indexing.
    pub exclusions: Vec<String>,

    /// Location of the serialized index (`index.json`).
    pub index_path: PathBuf,

    /// HTTP server settings.
    pub server: ServerConfig,

    /// Search client settings.
    pub client: ClientConfig,

    /// Performance settings.
    pub performance: PerformanceConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind.
    pub bind: String,

    /// Number of hits returned when a request carries no `limit`.
    pub result_limit: usize,

    /// Upper bound applied to any requested `limit`.
    pub max_result_limit: usize,

    /// Run an incremental scan of `index_roots` in the background at startup.
    pub reindex_on_start: bool,
}

/// Search client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the search server.
    pub server_url: String,

    /// Request timeout in milliseconds.
    pub timeout_ms: u64,

    /// Rows rendered by the ranked-list policy.
    pub limit: usize,
}

/// Performance-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Number of threads used to read and tokenize documents.
    pub indexer_threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_roots: Vec::new(),
            exclusions: vec![
                ".git".to_string(),
                "node_modules".to_string(),
                "target".to_string(),
            ],
            index_path: crate::paths::default_index_path(),
            server: ServerConfig::default(),
            client: ClientConfig::default(),
            performance: PerformanceConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
            result_limit: 10,
            max_result_limit: 100,
            reindex_on_start: true,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".to_string(),
            timeout_ms: 5_000,
            limit: 10,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            indexer_threads: num_cpus::get(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;

        config.expand_tilde_in_paths();
        config.validate()?;

        Ok(config)
    }

    /// Load the config at [`crate::paths::config_path`], or defaults if absent.
    pub fn load_or_default() -> crate::Result<Self> {
        let path = crate::paths::config_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    fn expand_tilde_in_paths(&mut self) {
        self.index_roots = self.index_roots.iter().map(|p| expand_tilde(p)).collect();
        self.index_path = expand_tilde(&self.index_path);
    }

    fn validate(&self) -> crate::Result<()> {
        if self.server.result_limit == 0 {
            return Err(crate::Error::Config(
                "server.result_limit must be at least 1".to_string(),
            ));
        }
        if self.server.max_result_limit < self.server.result_limit {
            return Err(crate::Error::Config(
                "server.max_result_limit must not be below server.result_limit".to_string(),
            ));
        }
        if self.performance.indexer_threads == 0 {
            return Err(crate::Error::Config(
                "performance.indexer_threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Ensure the directory holding the index file exists.
    pub fn ensure_index_dir(&self) -> crate::Result<()> {
        if let Some(parent) = self.index_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_consistent() {
        let config = Config::default();
        assert_eq!(config.server.result_limit, 10);
        assert_eq!(config.client.limit, 10);
        assert!(config.server.max_result_limit >= config.server.result_limit);
        assert!(config.performance.indexer_threads >= 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
index_roots = ["/srv/docs"]

[server]
bind = "127.0.0.1:9000"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.index_roots, vec![PathBuf::from("/srv/docs")]);
        assert_eq!(config.server.bind, "127.0.0.1:9000");
        assert_eq!(config.server.result_limit, 10);
        assert_eq!(config.client.timeout_ms, 5_000);
    }

    #[test]
    fn tilde_is_expanded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "index_path = \"~/idx/index.json\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.index_path.to_string_lossy().starts_with('~'));
        assert!(config.index_path.ends_with("idx/index.json"));
    }

    #[test]
    fn invalid_limits_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nresult_limit = 50\nmax_result_limit = 5\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.index_roots = vec![PathBuf::from("/data/site")];
        config.client.server_url = "http://search.local:8000".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.index_roots, config.index_roots);
        assert_eq!(loaded.client.server_url, "http://search.local:8000");
    }
}
