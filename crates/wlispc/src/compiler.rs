//! Responsible with compiling wlisp files into lisp files

use crate::TARGET_EXTENSION;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, error_span, Instrument};

pub mod error;
mod transpile;

pub use error::{CompileError, ErrorKind, WlispCError, WlispCErrorKind, WlispCResult};
pub use transpile::{compile_lines, compile_str, render, Compilation};

/// What to do with the remaining files once one of them fails to compile
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop starting new files after the first failure
    #[default]
    FailFast,
    /// Compile every file, collecting all failures
    KeepGoing,
}

/// Responsible with compiling wlisp files into lisp files.
///
/// Must be configured using an [WlispCBuilder].
#[derive(Debug)]
pub struct WlispC {
    max_jobs: usize,
    output_directory: Option<PathBuf>,
    source_root: Option<PathBuf>,
    failure_policy: FailurePolicy,
}

impl WlispC {
    /// Creates the default WlispCBuilder
    #[inline]
    pub fn builder() -> WlispCBuilder {
        WlispCBuilder::new()
    }

    /// Where the compiled form of `source` is written.
    ///
    /// Without an output directory the output sits next to its source. With one, the output
    /// mirrors the source's path relative to the source root, or just its file name if the source
    /// isn't below the root.
    pub fn output_path(&self, source: &Path) -> PathBuf {
        let Some(output_directory) = &self.output_directory else {
            return source.with_extension(TARGET_EXTENSION);
        };
        let relative = self
            .source_root
            .as_deref()
            .and_then(|root| source.strip_prefix(root).ok())
            .filter(|relative| !relative.as_os_str().is_empty())
            .or_else(|| source.file_name().map(Path::new))
            .unwrap_or(source);
        output_directory
            .join(relative)
            .with_extension(TARGET_EXTENSION)
    }

    /// Compile a file at a given path
    pub async fn compile(&self, path: &Path) -> WlispCResult<CompiledFile> {
        let destination = self.output_path(path);
        compile_file(path.to_path_buf(), destination)
            .instrument(error_span!("compile", path=?path))
            .await
    }

    /// Compiles every file at the given paths, at most `jobs` at a time.
    ///
    /// Files are started in sorted order. What happens after a failure depends on the
    /// [FailurePolicy]; files already being compiled always finish.
    pub async fn compile_all(&self, mut paths: Vec<PathBuf>) -> CompileReport {
        paths.sort();
        paths.dedup();
        debug!("compiling {} file(s) with at most {} job(s)", paths.len(), self.max_jobs);

        let mut pending = paths.into_iter();
        let mut join_set = JoinSet::new();
        let mut report = CompileReport::default();
        loop {
            while join_set.len() < self.max_jobs
                && (report.failures.is_empty() || self.failure_policy == FailurePolicy::KeepGoing)
            {
                let Some(path) = pending.next() else {
                    break;
                };
                let destination = self.output_path(&path);
                let span = error_span!("compile", path=?path);
                join_set.spawn(compile_file(path, destination).instrument(span));
            }

            let Some(joined) = join_set.join_next().await else {
                break;
            };
            match joined.map_err(WlispCError::from).and_then(|result| result) {
                Ok(compiled) => report.compiled.push(compiled),
                Err(e) => {
                    debug!("failed: {e}");
                    report.failures.push(e);
                }
            }
        }

        let skipped = pending.len();
        if skipped > 0 {
            debug!("skipped {skipped} file(s) after a failure");
        }
        report.compiled.sort_by(|a, b| a.source.cmp(&b.source));
        report
    }
}

async fn compile_file(source: PathBuf, destination: PathBuf) -> WlispCResult<CompiledFile> {
    let text = tokio::fs::read_to_string(&source)
        .await
        .map_err(|e| WlispCError::io(&source, e))?;
    let file_name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());

    let records = compile_str(&file_name, &text)?;
    debug!("compiled {} record(s)", records.len());

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| WlispCError::io(parent, e))?;
    }
    tokio::fs::write(&destination, render(&records))
        .await
        .map_err(|e| WlispCError::io(&destination, e))?;
    debug!("wrote {destination:?}");

    Ok(CompiledFile {
        source,
        destination,
        records: records.len(),
    })
}

/// A successfully compiled file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFile {
    source: PathBuf,
    destination: PathBuf,
    records: usize,
}

impl CompiledFile {
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// The number of top level records written
    pub fn records(&self) -> usize {
        self.records
    }
}

/// The outcome of compiling many files
#[derive(Debug, Default)]
pub struct CompileReport {
    compiled: Vec<CompiledFile>,
    failures: Vec<WlispCError>,
}

impl CompileReport {
    /// Files compiled successfully, sorted by source path
    pub fn compiled(&self) -> &[CompiledFile] {
        &self.compiled
    }

    /// Failures, in the order they were encountered
    pub fn failures(&self) -> &[WlispCError] {
        &self.failures
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Converts this report into a result, combining multiple failures into one error
    pub fn into_result(mut self) -> WlispCResult<Vec<CompiledFile>> {
        match self.failures.len() {
            0 => Ok(self.compiled),
            1 => Err(self.failures.remove(0)),
            _ => Err(WlispCError::from(self.failures)),
        }
    }
}

/// Builder for creating a [WlispC] instance.
#[derive(Debug)]
pub struct WlispCBuilder {
    /// Number of jobs to run at once
    pub jobs: usize,
    pub output_directory: Option<PathBuf>,
    pub source_root: Option<PathBuf>,
    pub failure_policy: FailurePolicy,
}

impl WlispCBuilder {
    /// Creates an WlispCBuilder with default settings
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of files compiled at once
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Sets the output directory for compiled files
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the directory whose layout is mirrored in the output directory
    pub fn source_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source_root = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Builds an [WlispC] instance from this builder
    pub fn build(self) -> Result<WlispC, BuildWlispCError> {
        if self.jobs == 0 {
            return Err(BuildWlispCError::ZeroJobs);
        }

        if let Some(output_directory) = &self.output_directory {
            let output_dir_meta = std::fs::metadata(output_directory).map_err(|e| {
                BuildWlispCError::OutputDirectoryDoesNotExist(output_directory.clone(), e)
            })?;
            if !output_dir_meta.is_dir() {
                return Err(BuildWlispCError::OutputDirectoryIsNotADirectory(
                    output_directory.clone(),
                ));
            }
        }
        Ok(WlispC {
            max_jobs: self.jobs,
            output_directory: self.output_directory,
            source_root: self.source_root,
            failure_policy: self.failure_policy,
        })
    }
}

impl Default for WlispCBuilder {
    fn default() -> Self {
        Self {
            jobs: num_cpus::get(),
            output_directory: None,
            source_root: None,
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// An error occurred while building an [WlispC] instance
#[derive(Debug, Error)]
pub enum BuildWlispCError {
    #[error("{0:?} does not exist: {1}")]
    OutputDirectoryDoesNotExist(PathBuf, io::Error),
    #[error("{0:?} is not a directory")]
    OutputDirectoryIsNotADirectory(PathBuf),
    #[error("Compilation can't occur if no jobs are allowed")]
    ZeroJobs,
}
