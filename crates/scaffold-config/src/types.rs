use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for one generator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory generated files are written under
    #[serde(default = "default_target_root")]
    pub target_root: PathBuf,

    /// Template directories, most specific first.
    ///
    /// A logical path resolves to the first directory that contains it, so
    /// earlier entries override later ones.
    #[serde(default = "default_template_dirs")]
    pub template_dirs: Vec<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            target_root: default_target_root(),
            template_dirs: default_template_dirs(),
        }
    }
}

impl GeneratorConfig {
    /// Create a config with an explicit target root and template chain
    pub fn new(target_root: impl Into<PathBuf>, template_dirs: Vec<PathBuf>) -> Self {
        Self {
            target_root: target_root.into(),
            template_dirs,
        }
    }

    /// Resolve relative entries against `base` (normally the config file's directory)
    pub fn resolve_relative_to(&self, base: &Path) -> Self {
        let resolve = |p: &PathBuf| {
            if p.is_absolute() {
                p.clone()
            } else {
                base.join(p)
            }
        };

        Self {
            target_root: resolve(&self.target_root),
            template_dirs: self.template_dirs.iter().map(resolve).collect(),
        }
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<(), String> {
        if self.template_dirs.is_empty() {
            return Err("template_dirs must name at least one directory".to_string());
        }
        if self.target_root.as_os_str().is_empty() {
            return Err("target_root must not be empty".to_string());
        }
        Ok(())
    }
}

fn default_target_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_template_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from("templates")]
}
