// src/config/config_load.rs
//
// loading of config.toml

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::config_types::{PathConfig, RenderConfig, StyleConfig, WindowConfig};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub window: WindowConfig,
    pub rendering: RenderConfig,
    pub style: StyleConfig,
    pub paths: PathConfig,
}

impl Config {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        // First try to load from the executable's directory
        if let Some(exe_config) = Self::load_from_exe_dir() {
            return Ok(exe_config);
        }

        // Fallback to loading from the current working directory
        Self::load_from_path("config.toml")
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(toml::from_str(content)?)
    }

    fn load_from_exe_dir() -> Option<Self> {
        let config_path = Self::exe_dir()?.join("config.toml");

        if config_path.exists() {
            let content = fs::read_to_string(&config_path).ok()?;
            toml::from_str(&content).ok()
        } else {
            None
        }
    }

    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    // Relative paths resolve against the executable's directory
    fn resolve(path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            return PathBuf::from(path);
        }
        match Self::exe_dir() {
            Some(exe_dir) => exe_dir.join(path),
            None => PathBuf::from(path),
        }
    }

    pub fn resolve_output_dir(&self) -> PathBuf {
        Self::resolve(&self.paths.output_directory)
    }

    /// The configured source image as a `file://` URL, if there is one
    pub fn resolve_source_url(&self) -> Option<String> {
        self.paths
            .source_image
            .as_deref()
            .map(|source| format!("file://{}", Self::resolve(source).display()))
    }
}
