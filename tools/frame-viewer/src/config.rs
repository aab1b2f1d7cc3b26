// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_ARTIFACT_PATH: &str = "dcision_tree.pkl";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8501";
pub const DEFAULT_PAGE_TITLE: &str = "Artifact Viewer";

fn default_artifact_path() -> PathBuf {
    PathBuf::from(DEFAULT_ARTIFACT_PATH)
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8501))
}

fn default_page_title() -> String {
    DEFAULT_PAGE_TITLE.to_string()
}

/// Settings fixed at process start. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewerConfig {
    #[serde(default = "default_artifact_path")]
    pub artifact_path: PathBuf,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,
    #[serde(default = "default_page_title")]
    pub page_title: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            artifact_path: default_artifact_path(),
            listen_addr: default_listen_addr(),
            page_title: default_page_title(),
        }
    }
}

impl ViewerConfig {
    /// Parse a YAML config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config: ViewerConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Apply command-line overrides on top of file/default values.
    pub fn with_overrides(
        mut self,
        artifact_path: Option<PathBuf>,
        listen_addr: Option<SocketAddr>,
        page_title: Option<String>,
    ) -> Self {
        if let Some(path) = artifact_path {
            self.artifact_path = path;
        }
        if let Some(addr) = listen_addr {
            self.listen_addr = addr;
        }
        if let Some(title) = page_title {
            self.page_title = title;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.artifact_path, PathBuf::from("dcision_tree.pkl"));
        assert_eq!(config.listen_addr.to_string(), DEFAULT_LISTEN_ADDR);
        assert_eq!(config.page_title, DEFAULT_PAGE_TITLE);
    }

    #[test]
    fn test_parse_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.yaml");
        let yaml = r#"
artifact_path: /data/cars.parquet
listen_addr: 0.0.0.0:9000
page_title: Car Performance Data
"#;
        fs::write(&path, yaml).unwrap();

        let config = ViewerConfig::from_file(&path).unwrap();
        assert_eq!(config.artifact_path, PathBuf::from("/data/cars.parquet"));
        assert_eq!(config.listen_addr.port(), 9000);
        assert_eq!(config.page_title, "Car Performance Data");
    }

    #[test]
    fn test_parse_minimal_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.yaml");
        fs::write(&path, "artifact_path: cars.bin\n").unwrap();

        let config = ViewerConfig::from_file(&path).unwrap();
        assert_eq!(config.artifact_path, PathBuf::from("cars.bin"));
        assert_eq!(config.listen_addr, default_listen_addr());
        assert_eq!(config.page_title, DEFAULT_PAGE_TITLE);
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.yaml");
        fs::write(&path, "artifactPath: cars.bin\n").unwrap();

        let err = ViewerConfig::from_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ViewerConfig::from_file(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().starts_with("reading "));
    }

    #[test]
    fn test_overrides() {
        let config = ViewerConfig::default().with_overrides(
            Some(PathBuf::from("other.pkl")),
            None,
            Some("Cars".to_string()),
        );
        assert_eq!(config.artifact_path, PathBuf::from("other.pkl"));
        assert_eq!(config.listen_addr, default_listen_addr());
        assert_eq!(config.page_title, "Cars");
    }
}
