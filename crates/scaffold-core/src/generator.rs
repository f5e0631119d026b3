//! Config-driven generator context.

use crate::command::FileCommand;
use crate::confirm::OverwriteConfirmer;
use crate::context::GeneratorContext;
use crate::error::Result;
use scaffold_config::{ConfigManager, GeneratorConfig};
use scaffold_fs::{FileSystem, NativeFileSystem};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// A generator built from a [`GeneratorConfig`].
///
/// Logical paths resolve under `target_root`; templates are looked up through
/// `template_dirs` in order, so the first directory holding a path wins.
/// The filesystem must be scoped to a root that covers both.
pub struct Generator<F: FileSystem = NativeFileSystem> {
    fs: Arc<F>,
    config: GeneratorConfig,
}

impl Generator {
    /// Load `scaffold.toml` and scope a native filesystem to its directory.
    ///
    /// Relative paths in the config resolve against the config's directory.
    pub async fn load(config_path: &Path) -> Result<Self> {
        let manager = ConfigManager::load_from(config_path).await?;
        let fs = NativeFileSystem::new(manager.config_dir())
            .map_err(scaffold_config::ConfigError::Io)?;

        // Resolve against the canonical root so relative config dirs can't double up
        let config = manager.config().resolve_relative_to(fs.project_root());
        Ok(Self::new(Arc::new(fs), config))
    }
}

impl<F: FileSystem> Generator<F> {
    pub fn new(fs: Arc<F>, config: GeneratorConfig) -> Self {
        Self { fs, config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn filesystem(&self) -> &Arc<F> {
        &self.fs
    }

    /// Create a file command for `path` bound to this generator.
    pub fn command(
        &self,
        path: impl Into<String>,
        confirmer: Arc<dyn OverwriteConfirmer>,
    ) -> FileCommand<'_>
    where
        F: 'static,
    {
        let fs: Arc<dyn FileSystem> = self.fs.clone();
        FileCommand::new(path, self, fs, confirmer)
    }
}

#[async_trait::async_trait]
impl<F: FileSystem> GeneratorContext for Generator<F> {
    fn target_path(&self, path: &str) -> PathBuf {
        self.config.target_root.join(path)
    }

    async fn target_exists(&self, path: &str) -> io::Result<bool> {
        self.fs.exists(&self.target_path(path)).await
    }

    async fn template_path(&self, path: &str) -> io::Result<Option<PathBuf>> {
        for dir in &self.config.template_dirs {
            let candidate = dir.join(path);
            if self.fs.metadata(&candidate).await?.is_file {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }

    fn format_message(&self, path: &str, command_type: &str, text: &str) -> String {
        format!("{command_type} {path} {text}")
    }

    fn log(&self, path: &str, command_type: &str, text: &str) {
        info!(path, command_type, "{text}");
    }
}
