//! Shared fixtures: an in-memory project with a journaled filesystem, a
//! context that records log lines, and a confirmer that records prompts.

#![allow(dead_code)]

use parking_lot::Mutex;
use scaffold_config::GeneratorConfig;
use scaffold_core::{FileCommand, Generator, GeneratorContext, OverwriteConfirmer};
use scaffold_fs::{FileMetadata, FileSystem, MemoryFileSystem};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const ROOT: &str = "/project";
pub const TEMPLATES: &str = "/project/templates";
pub const OUT: &str = "/project/out";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Exists(PathBuf),
    Read(PathBuf),
    Write(PathBuf),
    Remove(PathBuf),
    Rename(PathBuf, PathBuf),
}

impl Op {
    pub fn is_mutation(&self) -> bool {
        matches!(self, Op::Write(_) | Op::Remove(_) | Op::Rename(..))
    }
}

/// MemoryFileSystem that journals every operation and can fail writes or
/// removals.
pub struct JournalFs {
    pub inner: MemoryFileSystem,
    journal: Mutex<Vec<Op>>,
    fail_writes: Mutex<bool>,
    fail_removes: Mutex<bool>,
}

impl JournalFs {
    pub fn new() -> Self {
        Self {
            inner: MemoryFileSystem::empty(ROOT).unwrap(),
            journal: Mutex::new(Vec::new()),
            fail_writes: Mutex::new(false),
            fail_removes: Mutex::new(false),
        }
    }

    pub fn ops(&self) -> Vec<Op> {
        self.journal.lock().clone()
    }

    pub fn mutations(&self) -> Vec<Op> {
        self.ops().into_iter().filter(Op::is_mutation).collect()
    }

    pub fn reads_of(&self, path: impl AsRef<Path>) -> usize {
        let path = path.as_ref();
        self.ops()
            .iter()
            .filter(|op| matches!(op, Op::Read(p) if p == path))
            .count()
    }

    pub fn clear_journal(&self) {
        self.journal.lock().clear();
    }

    pub fn fail_writes(&self) {
        *self.fail_writes.lock() = true;
    }

    pub fn fail_removes(&self) {
        *self.fail_removes.lock() = true;
    }

    fn check_remove(&self) -> io::Result<()> {
        if *self.fail_removes.lock() {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "busy"));
        }
        Ok(())
    }

    fn record(&self, op: Op) {
        self.journal.lock().push(op);
    }
}

#[async_trait::async_trait]
impl FileSystem for JournalFs {
    async fn exists(&self, path: &Path) -> io::Result<bool> {
        self.record(Op::Exists(path.to_path_buf()));
        self.inner.exists(path).await
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.record(Op::Read(path.to_path_buf()));
        self.inner.read_to_string(path).await
    }

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.record(Op::Read(path.to_path_buf()));
        self.inner.read(path).await
    }

    async fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        self.inner.metadata(path).await
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.write_bytes(path, contents.as_bytes()).await
    }

    async fn write_bytes(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.record(Op::Write(path.to_path_buf()));
        if *self.fail_writes.lock() {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        self.inner.write_bytes(path, contents).await
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.record(Op::Remove(path.to_path_buf()));
        self.check_remove()?;
        self.inner.remove_file(path).await
    }

    async fn remove_entry(&self, path: &Path) -> io::Result<()> {
        self.record(Op::Remove(path.to_path_buf()));
        self.check_remove()?;
        self.inner.remove_entry(path).await
    }

    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        self.record(Op::Rename(from.to_path_buf(), to.to_path_buf()));
        self.inner.rename(from, to).await
    }

    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.inner.create_dir_all(path).await
    }

    fn project_root(&self) -> &Path {
        self.inner.project_root()
    }
}

/// Generator context that remembers what it logged.
pub struct RecordingContext {
    generator: Generator<JournalFs>,
    logs: Mutex<Vec<String>>,
}

impl RecordingContext {
    pub fn logs(&self) -> Vec<String> {
        self.logs.lock().clone()
    }
}

#[async_trait::async_trait]
impl GeneratorContext for RecordingContext {
    fn target_path(&self, path: &str) -> PathBuf {
        self.generator.target_path(path)
    }

    async fn target_exists(&self, path: &str) -> io::Result<bool> {
        self.generator.target_exists(path).await
    }

    async fn template_path(&self, path: &str) -> io::Result<Option<PathBuf>> {
        self.generator.template_path(path).await
    }

    fn format_message(&self, path: &str, command_type: &str, text: &str) -> String {
        self.generator.format_message(path, command_type, text)
    }

    fn log(&self, path: &str, command_type: &str, text: &str) {
        self.logs.lock().push(format!("{command_type} {path} {text}"));
    }
}

/// Confirmer with a fixed answer that remembers every prompt.
pub struct RecordingConfirmer {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl RecordingConfirmer {
    pub fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait::async_trait]
impl OverwriteConfirmer for RecordingConfirmer {
    async fn confirm(&self, message: &str) -> io::Result<bool> {
        self.prompts.lock().push(message.to_string());
        Ok(self.answer)
    }
}

/// Confirmer whose prompt cannot be answered, like a closed stdin.
pub struct FailingConfirmer;

#[async_trait::async_trait]
impl OverwriteConfirmer for FailingConfirmer {
    async fn confirm(&self, _message: &str) -> io::Result<bool> {
        Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"))
    }
}

/// An in-memory project: templates under `/project/templates`, output under
/// `/project/out`.
pub struct Project {
    pub fs: Arc<JournalFs>,
    pub context: RecordingContext,
}

impl Project {
    pub fn new() -> Self {
        let fs = Arc::new(JournalFs::new());
        let config = GeneratorConfig::new(OUT, vec![PathBuf::from(TEMPLATES)]);
        let generator = Generator::new(fs.clone(), config);

        Self {
            fs,
            context: RecordingContext {
                generator,
                logs: Mutex::new(Vec::new()),
            },
        }
    }

    pub fn template(&self, path: &str, contents: &str) -> &Self {
        self.fs
            .inner
            .add_file(Path::new(TEMPLATES).join(path), contents)
            .unwrap();
        self
    }

    pub fn target(&self, path: &str, contents: &str) -> &Self {
        self.fs
            .inner
            .add_file(Path::new(OUT).join(path), contents)
            .unwrap();
        self
    }

    pub fn read_target(&self, path: &str) -> Option<String> {
        self.read(Path::new(OUT).join(path))
    }

    pub fn read_backup(&self, path: &str) -> Option<String> {
        self.read(Path::new(OUT).join(format!("{path}.bak")))
    }

    fn read(&self, path: PathBuf) -> Option<String> {
        self.fs
            .inner
            .get(path)
            .map(|bytes| String::from_utf8(bytes).unwrap())
    }

    pub fn command(
        &self,
        path: &str,
        confirmer: Arc<dyn OverwriteConfirmer>,
    ) -> FileCommand<'_> {
        let fs: Arc<dyn FileSystem> = self.fs.clone();
        FileCommand::new(path, &self.context, fs, confirmer)
    }
}
