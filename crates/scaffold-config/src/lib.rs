//! Generator configuration for scaffold.
//!
//! A `scaffold.toml` names the directory generated files land in and the
//! ordered chain of template directories searched for each logical path.

pub mod manager;
pub mod types;

pub use manager::{ConfigError, ConfigManager, CONFIG_FILE_NAME};
pub use types::GeneratorConfig;
