//! Async filesystem abstraction for scaffold.
//!
//! This crate provides a `FileSystem` trait with two implementations: a native
//! one (using `std::fs` on tokio's blocking pool) scoped to a root directory,
//! and an in-memory one used when generation should not touch disk.
//!
//! # Example
//!
//! ```no_run
//! use scaffold_fs::{FileSystem, NativeFileSystem};
//! use std::sync::Arc;
//! use std::path::Path;
//!
//! # #[tokio::main]
//! # async fn main() -> std::io::Result<()> {
//! let fs = Arc::new(NativeFileSystem::new(".")?);
//! let contents = fs.read_to_string(Path::new("README.md")).await?;
//! println!("{}", contents);
//! # Ok(())
//! # }
//! ```

mod file_system;
pub use file_system::{FileMetadata, FileSystem};

#[cfg(feature = "native")]
pub mod native;
#[cfg(feature = "native")]
pub use native::NativeFileSystem;

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "memory")]
pub use memory::MemoryFileSystem;
