//! Scaffold Core - safe materialization of generated files.
//!
//! Given a logical path, a [`FileCommand`] decides whether its generated output
//! may be written, skips the write when the target already matches, and
//! otherwise asks before moving the old target to `<target>.bak` and writing.
//!
//! - [`GeneratorContext`]: path resolution, template lookup and logging
//! - [`OverwriteConfirmer`]: the yes/no gate in front of any overwrite
//! - [`Output`]: what gets written (the template verbatim by default)
//! - [`Generator`]: a context driven by `scaffold.toml`
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ scaffold-core   │  (This crate - check / confirm / backup / write)
//! └───┬─────────┬───┘
//!     │         │
//!     ▼         ▼
//! ┌────────┐ ┌─────────────────┐
//! │scaffold│ │ scaffold-config │  (scaffold.toml)
//! │  -fs   │ └─────────────────┘
//! └────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use scaffold_core::{Generator, RunOutcome, StdinConfirmer};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> scaffold_core::Result<()> {
//! let generator = Generator::load(Path::new("scaffold.toml")).await?;
//!
//! let mut command = generator.command("report.md", Arc::new(StdinConfirmer));
//! match command.run().await? {
//!     RunOutcome::Written { backed_up: true } => {
//!         println!("previous version kept at {}", command.target_backup_path().display());
//!     }
//!     RunOutcome::Written { .. } => println!("created"),
//!     RunOutcome::Skipped | RunOutcome::Declined => println!("left alone"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod backup;
mod cache;
pub mod command;
pub mod confirm;
pub mod context;
pub mod error;
pub mod generator;
pub mod output;

pub use backup::{backup_path, BACKUP_SUFFIX};
pub use command::{CheckOutcome, FileCommand, RunOutcome, COMMAND_TYPE};
pub use confirm::{is_affirmative, AutoConfirm, OverwriteConfirmer, StdinConfirmer};
pub use context::GeneratorContext;
pub use error::{Action, Error, Result};
pub use generator::Generator;
pub use output::{Contents, Literal, Output, Verbatim};
