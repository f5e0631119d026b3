use crate::types::GeneratorConfig;
use scaffold_fs::{FileSystem, NativeFileSystem};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Conventional config file name
pub const CONFIG_FILE_NAME: &str = "scaffold.toml";

/// Errors that can occur during config management
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Config file not found at {0}")]
    ConfigNotFound(PathBuf),

    #[error("Invalid config at {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

/// A generator's loaded and validated `scaffold.toml`
///
/// Relative paths in the config are relative to [`ConfigManager::config_dir`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
    config: GeneratorConfig,
}

impl ConfigManager {
    /// Load config from a specific path on disk
    pub async fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let fs = NativeFileSystem::new(config_dir(path))?;
        Self::load_with_filesystem(&fs, path).await
    }

    /// Load config through a custom FileSystem
    ///
    /// For tests or dry runs, provide a FileSystem scoped to the config directory.
    pub async fn load_with_filesystem<F: FileSystem + ?Sized>(
        fs: &F,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        if !fs.exists(path).await? {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let contents = fs.read_to_string(path).await?;
        let config: GeneratorConfig = toml::from_str(&contents)?;
        config.validate().map_err(|message| ConfigError::Invalid {
            path: path.to_path_buf(),
            message,
        })?;

        Ok(Self {
            config_path: path.to_path_buf(),
            config,
        })
    }

    /// Get reference to config as written in the file
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Path of the config file
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Directory containing the config file
    pub fn config_dir(&self) -> &Path {
        config_dir(&self.config_path)
    }
}

fn config_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
