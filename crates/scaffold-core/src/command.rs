//! The file command: check a target, confirm, back up, write.
//!
//! `check()` walks a small state machine:
//!
//! ```text
//! Start ──absent──▶ NoConflict ─────────────────────────▶ proceed
//!   │
//!   └─exists─▶ Occupied ──same bytes──▶ Skipped ─────────▶ stop
//!                 │
//!                 └─differs─▶ Different ──yes──▶ Confirmed (backed up) ─▶ proceed
//!                                 │
//!                                 └──no───▶ Declined ────▶ stop
//! ```
//!
//! `execute()` writes output unconditionally. Call `check()` first and skip
//! `execute()` when it returns `false`, or use `run()` which does both.

use crate::backup::{self, backup_path};
use crate::cache::ContentCache;
use crate::confirm::OverwriteConfirmer;
use crate::context::GeneratorContext;
use crate::error::{Action, Origin, Result};
use crate::output::{Contents, Output, Verbatim};
use scaffold_fs::FileSystem;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Command type reported in logs and errors.
pub const COMMAND_TYPE: &str = "file";

/// How `check()` finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Nothing exists at the target.
    NoConflict,
    /// The target already holds exactly the output.
    Skipped,
    /// The user agreed to overwrite; the old target is now at `<target>.bak`.
    Confirmed,
    /// The user refused; the target is untouched.
    Declined,
}

impl CheckOutcome {
    /// Whether the caller should go on to `execute()`.
    pub fn proceed(self) -> bool {
        matches!(self, Self::NoConflict | Self::Confirmed)
    }

    /// Whether `check()` moved the old target to its backup path.
    pub fn backed_up(self) -> bool {
        self == Self::Confirmed
    }
}

/// How `run()` finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Output was written; `backed_up` if a previous target was moved aside.
    Written { backed_up: bool },
    /// The target already matched; nothing written.
    Skipped,
    /// The user refused to overwrite; nothing written.
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckState {
    Start,
    Occupied,
    Different,
    Done(CheckOutcome),
}

/// One logical path's unit of work for a single generation run.
///
/// Commands are single-use: the template cache lives and dies with the
/// command, and `check()`/`execute()` are each meant to be called once.
/// Two commands must not run against the same target at the same time.
pub struct FileCommand<'g> {
    path: String,
    context: &'g dyn GeneratorContext,
    fs: Arc<dyn FileSystem>,
    confirmer: Arc<dyn OverwriteConfirmer>,
    output: Box<dyn Output>,
    cache: ContentCache,
}

impl<'g> FileCommand<'g> {
    /// Create a command for a logical path that writes its template verbatim.
    pub fn new(
        path: impl Into<String>,
        context: &'g dyn GeneratorContext,
        fs: Arc<dyn FileSystem>,
        confirmer: Arc<dyn OverwriteConfirmer>,
    ) -> Self {
        Self {
            path: path.into(),
            context,
            fs,
            confirmer,
            output: Box::new(Verbatim),
            cache: ContentCache::new(),
        }
    }

    /// Replace how output is produced.
    pub fn with_output(mut self, output: impl Output + 'static) -> Self {
        self.output = Box::new(output);
        self
    }

    /// Logical path this command was created with.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Command type used in logs and errors.
    pub fn command_type(&self) -> &'static str {
        COMMAND_TYPE
    }

    /// Physical path the output is written to.
    pub fn target_path(&self) -> PathBuf {
        self.context.target_path(&self.path)
    }

    /// Where the current target is moved before an overwrite.
    pub fn target_backup_path(&self) -> PathBuf {
        backup_path(&self.target_path())
    }

    /// Whether the template has been loaded into the cache.
    pub fn is_template_loaded(&self) -> bool {
        self.cache.is_loaded()
    }

    fn origin(&self) -> Origin<'_> {
        Origin {
            path: &self.path,
            command_type: COMMAND_TYPE,
        }
    }

    /// Template text, found through the context's template chain.
    ///
    /// Loaded from disk on the first call only; later calls return the
    /// cached text without I/O.
    ///
    /// # Errors
    ///
    /// `TemplateNotFound` when no template provides the path, `Io` when the
    /// template can't be read.
    pub async fn get_contents(&mut self) -> Result<&str> {
        let origin = Origin {
            path: &self.path,
            command_type: COMMAND_TYPE,
        };
        self.cache
            .get_contents(origin, self.context, self.fs.as_ref())
            .await
    }

    /// Text this command writes to its target.
    pub async fn output(&mut self) -> Result<String> {
        let origin = Origin {
            path: &self.path,
            command_type: COMMAND_TYPE,
        };
        let contents = Contents::new(origin, &mut self.cache, self.context, self.fs.as_ref());
        self.output.output(contents).await
    }

    /// Whether the existing target already holds exactly the output.
    ///
    /// Compares raw bytes with no normalization. Only meaningful when the
    /// target exists; a missing target is an I/O error here.
    pub async fn check_target_same(&mut self) -> Result<bool> {
        let target = self
            .fs
            .read(&self.target_path())
            .await
            .map_err(self.origin().io(Action::ReadTarget))?;
        let output = self.output().await?;

        Ok(target == output.as_bytes())
    }

    /// Move the target to `<target>.bak`, replacing any earlier backup.
    pub async fn move_target_to_backup(&self) -> Result<PathBuf> {
        backup::move_to_backup(self.fs.as_ref(), &self.target_path(), self.origin()).await
    }

    /// Ask whether to overwrite; back the target up if the answer is yes.
    ///
    /// Returns whether the target was moved aside, which is also whether the
    /// caller should write.
    pub async fn prompt_for_delete(&self) -> Result<bool> {
        let message = self
            .context
            .format_message(&self.path, COMMAND_TYPE, "override?: ");

        let confirmed = self
            .confirmer
            .confirm(&message)
            .await
            .map_err(self.origin().io(Action::Confirm))?;

        if confirmed {
            self.move_target_to_backup().await?;
        }

        Ok(confirmed)
    }

    /// Decide whether writing is safe, and how `check()` got there.
    pub async fn check_outcome(&mut self) -> Result<CheckOutcome> {
        let mut state = CheckState::Start;

        loop {
            state = match state {
                CheckState::Start => {
                    let exists = self
                        .context
                        .target_exists(&self.path)
                        .await
                        .map_err(self.origin().io(Action::CheckTarget))?;

                    if exists {
                        CheckState::Occupied
                    } else {
                        CheckState::Done(CheckOutcome::NoConflict)
                    }
                }
                CheckState::Occupied => {
                    if self.check_target_same().await? {
                        self.context.log(
                            &self.path,
                            COMMAND_TYPE,
                            "files are the same skipping",
                        );
                        CheckState::Done(CheckOutcome::Skipped)
                    } else {
                        CheckState::Different
                    }
                }
                CheckState::Different => {
                    if self.prompt_for_delete().await? {
                        CheckState::Done(CheckOutcome::Confirmed)
                    } else {
                        CheckState::Done(CheckOutcome::Declined)
                    }
                }
                CheckState::Done(outcome) => return Ok(outcome),
            };

            debug!(path = %self.path, ?state, "check transition");
        }
    }

    /// Whether the caller may go on to `execute()`.
    ///
    /// - `true` when the target is absent, or differs and the user agreed to
    ///   overwrite (the old target is now at `<target>.bak`).
    /// - `false` when the target already matches, or the user declined. The
    ///   target is untouched in both cases.
    ///
    /// The only mutation `check()` ever makes is the confirmed backup.
    pub async fn check(&mut self) -> Result<bool> {
        self.check_outcome().await.map(CheckOutcome::proceed)
    }

    /// Write output to the target, replacing whatever is there.
    ///
    /// Performs no conflict checking. `Ok(())` means the output was written
    /// and the command completed; there is no "did nothing" success. Every
    /// failure is an `Err`. On failure nothing is rolled back: a backup made
    /// by `check()` stays where it is.
    pub async fn execute(&mut self) -> Result<()> {
        let output = self.output().await?;
        let target = self.target_path();

        self.fs
            .write(&target, &output)
            .await
            .map_err(self.origin().io(Action::WriteTarget))?;

        self.context.log(&self.path, COMMAND_TYPE, "complete");
        Ok(())
    }

    /// `check()`, then `execute()` if the check allows it.
    pub async fn run(&mut self) -> Result<RunOutcome> {
        match self.check_outcome().await? {
            CheckOutcome::Skipped => Ok(RunOutcome::Skipped),
            CheckOutcome::Declined => Ok(RunOutcome::Declined),
            outcome => {
                self.execute().await?;
                Ok(RunOutcome::Written {
                    backed_up: outcome.backed_up(),
                })
            }
        }
    }
}
