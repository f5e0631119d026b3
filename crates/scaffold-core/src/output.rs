//! What a command writes to its target.

use crate::cache::ContentCache;
use crate::context::GeneratorContext;
use crate::error::{Origin, Result};
use scaffold_fs::FileSystem;

/// Produces the text a command writes to its target.
///
/// The same output is used both for the same-content comparison during
/// `check()` and for the write during `execute()`, so implementations should
/// be deterministic for a given command.
#[async_trait::async_trait]
pub trait Output: Send + Sync {
    /// Produce output, optionally from the command's template.
    async fn output(&self, contents: Contents<'_>) -> Result<String>;
}

/// Handle onto a command's cached template.
///
/// Consuming it with [`Contents::get`] loads the template on first use.
/// Outputs that never call it never touch the template chain.
pub struct Contents<'a> {
    origin: Origin<'a>,
    cache: &'a mut ContentCache,
    context: &'a dyn GeneratorContext,
    fs: &'a dyn FileSystem,
}

impl<'a> Contents<'a> {
    pub(crate) fn new(
        origin: Origin<'a>,
        cache: &'a mut ContentCache,
        context: &'a dyn GeneratorContext,
        fs: &'a dyn FileSystem,
    ) -> Self {
        Self {
            origin,
            cache,
            context,
            fs,
        }
    }

    /// Logical path of the command.
    pub fn path(&self) -> &str {
        self.origin.path
    }

    /// The raw template text.
    ///
    /// # Errors
    ///
    /// `TemplateNotFound` if no template provides the path, `Io` if it
    /// cannot be read.
    pub async fn get(self) -> Result<&'a str> {
        let Self {
            origin,
            cache,
            context,
            fs,
        } = self;
        cache.get_contents(origin, context, fs).await
    }
}

/// Writes the template unchanged. The default output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

#[async_trait::async_trait]
impl Output for Verbatim {
    async fn output(&self, contents: Contents<'_>) -> Result<String> {
        contents.get().await.map(str::to_owned)
    }
}

/// Writes a fixed string, ignoring templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal(pub String);

impl Literal {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

#[async_trait::async_trait]
impl Output for Literal {
    async fn output(&self, _contents: Contents<'_>) -> Result<String> {
        Ok(self.0.clone())
    }
}
