//! Per-command template content cache.

use crate::context::GeneratorContext;
use crate::error::{Action, Origin, Result};
use scaffold_fs::FileSystem;
use tracing::debug;

/// Raw template text for one command, loaded at most once.
///
/// Once populated the cached text is never reloaded, even if the template
/// changes on disk. A failed load leaves the cache empty.
#[derive(Debug, Default)]
pub(crate) struct ContentCache {
    template: Option<String>,
}

impl ContentCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_loaded(&self) -> bool {
        self.template.is_some()
    }

    /// Cached template, loading it through the context on first use.
    pub(crate) async fn get_contents(
        &mut self,
        origin: Origin<'_>,
        context: &dyn GeneratorContext,
        fs: &dyn FileSystem,
    ) -> Result<&str> {
        let template = match self.template.take() {
            Some(cached) => cached,
            None => load(origin, context, fs).await?,
        };
        Ok(self.template.insert(template).as_str())
    }
}

async fn load(
    origin: Origin<'_>,
    context: &dyn GeneratorContext,
    fs: &dyn FileSystem,
) -> Result<String> {
    let location = context
        .template_path(origin.path)
        .await
        .map_err(origin.io(Action::LocateTemplate))?
        .ok_or_else(|| origin.template_not_found())?;

    debug!(path = origin.path, template = %location.display(), "loading template");

    fs.read_to_string(&location)
        .await
        .map_err(origin.io(Action::ReadTemplate))
}
