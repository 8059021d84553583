use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::{
    convert::file::{ConvertOutcome, convert_file},
    foundation::error::{Mode2Error, Mode2Result},
};

/// How a directory of sources is processed.
#[derive(Clone, Debug, Default)]
pub struct BatchOpts {
    /// Convert files on a dedicated thread pool.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// A source that could not be converted.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FailedFile {
    pub source: PathBuf,
    pub error: String,
}

/// Result of converting a directory; one entry per source file.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct BatchReport {
    pub written: Vec<ConvertOutcome>,
    pub skipped: Vec<ConvertOutcome>,
    pub failed: Vec<FailedFile>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, source: PathBuf, result: Mode2Result<ConvertOutcome>) {
        match result {
            Ok(outcome @ ConvertOutcome::Written { .. }) => self.written.push(outcome),
            Ok(outcome @ ConvertOutcome::Skipped { .. }) => self.skipped.push(outcome),
            Err(e) => {
                tracing::warn!(source = %source.display(), error = %e, "conversion failed");
                self.failed.push(FailedFile {
                    source,
                    error: e.to_string(),
                });
            }
        }
    }
}

/// GIF files directly inside `dir`, sorted by path.
pub fn list_sources(dir: &Path) -> Mode2Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read source dir '{}'", dir.display()))?;

    let mut sources = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry in '{}'", dir.display()))?;
        let path = entry.path();
        let is_gif = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"));
        if is_gif && path.is_file() {
            sources.push(path);
        }
    }
    sources.sort();
    Ok(sources)
}

/// Convert every GIF in `source_dir` into `out_dir`.
///
/// A failing file is logged and recorded in the report; the remaining files are still
/// converted. Only a missing or unreadable source directory fails the whole batch.
#[tracing::instrument(skip(opts))]
pub fn convert_dir(source_dir: &Path, out_dir: &Path, opts: &BatchOpts) -> Mode2Result<BatchReport> {
    let sources = list_sources(source_dir)?;
    tracing::debug!(count = sources.len(), "found sources");

    let convert_one = |source: &PathBuf| {
        tracing::info!(source = %source.display(), "converting");
        convert_file(source, out_dir)
    };

    let results: Vec<Mode2Result<ConvertOutcome>> = if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| sources.par_iter().map(convert_one).collect())
    } else {
        sources.iter().map(convert_one).collect()
    };

    let mut report = BatchReport::default();
    for (source, result) in sources.into_iter().zip(results) {
        report.record(source, result);
    }
    tracing::info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        "batch finished"
    );
    Ok(report)
}

fn build_thread_pool(threads: Option<usize>) -> Mode2Result<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(Mode2Error::validation(
            "batch threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| Mode2Error::internal(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/convert/batch.rs"]
mod tests;
