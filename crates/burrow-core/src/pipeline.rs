//! Repository aggregator: walk, parse, extract and merge, one file at a time.

use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, info, warn};

use crate::config::{FailurePolicy, InspectConfig};
use crate::error::{InspectError, ParseFailure};
use crate::languages::AnalyserRegistry;
use crate::phases;
use crate::report::AnalysisReport;

/// Where a walk currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkState {
    Idle,
    Enumerating,
    Parsing,
    Extracting,
    Merging,
    Done,
    Failed,
}

impl WalkState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Enumerating => "enumerating",
            Self::Parsing => "parsing",
            Self::Extracting => "extracting",
            Self::Merging => "merging",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// Label for progress reporting.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Waiting",
            Self::Enumerating => "Enumerating source files",
            Self::Parsing => "Parsing",
            Self::Extracting => "Extracting facts",
            Self::Merging => "Merging",
            Self::Done => "Done",
            Self::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for WalkState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress callback type: (state, label or file path).
pub type ProgressCallback = Box<dyn FnMut(WalkState, &str)>;

struct Progress {
    callback: Option<ProgressCallback>,
}

impl Progress {
    fn enter(&mut self, state: WalkState, detail: &str) {
        if let Some(ref mut cb) = self.callback {
            cb(state, detail);
        }
    }
}

/// Validate the root, then walk it and return the merged report.
///
/// Files are visited in lexical order. Under [`FailurePolicy::AbortOnFirst`] the first
/// parse failure ends the run; under [`FailurePolicy::CollectAll`] every file is still
/// parsed so all failures can be reported. Either way no partial report is returned.
pub fn run_pipeline(
    config: &InspectConfig,
    progress_callback: Option<ProgressCallback>,
) -> Result<AnalysisReport, InspectError> {
    let mut progress = Progress {
        callback: progress_callback,
    };
    let result = walk(config, &mut progress);
    match &result {
        Ok(_) => progress.enter(WalkState::Done, WalkState::Done.label()),
        Err(e) => progress.enter(WalkState::Failed, &e.to_string()),
    }
    result
}

fn walk(config: &InspectConfig, progress: &mut Progress) -> Result<AnalysisReport, InspectError> {
    let root = Path::new(&config.repo_path);
    phases::discovery::validate_root(root)?;

    let registry = AnalyserRegistry::new();
    let mut report = AnalysisReport::new();
    let mut failures: Vec<(PathBuf, ParseFailure)> = Vec::new();
    let start = Instant::now();

    info!("inspecting {}", root.display());
    progress.enter(WalkState::Enumerating, WalkState::Enumerating.label());

    for file in phases::discovery::discover(config, &registry) {
        let file = file?;
        let analyser = match registry.get_for_path(&file.path) {
            Some(a) => a,
            None => continue,
        };

        progress.enter(WalkState::Parsing, &file.rel_path);
        let parsed = match phases::parsing::parse_file(analyser, &file.path) {
            Ok(p) => p,
            Err(InspectError::Parse { path, failure })
                if config.failure_policy == FailurePolicy::CollectAll =>
            {
                warn!("{}: {}", path.display(), failure);
                failures.push((path, failure));
                continue;
            }
            Err(e) => return Err(e),
        };

        // Once a failure is recorded only parsing continues
        if !failures.is_empty() {
            continue;
        }

        progress.enter(WalkState::Extracting, &file.rel_path);
        let facts = phases::extraction::extract_facts(analyser, &parsed);

        progress.enter(WalkState::Merging, &file.rel_path);
        report.merge(facts);
        debug!("merged {}", file.rel_path);
    }

    match failures.len() {
        0 => {}
        1 => {
            let (path, failure) = failures.remove(0);
            return Err(InspectError::Parse { path, failure });
        }
        _ => return Err(InspectError::ParseFailures(failures)),
    }

    info!(
        "inspected {} files in {:.1}ms: {} imports, {} struct types, {} call keys",
        report.files_analyzed,
        start.elapsed().as_secs_f64() * 1000.0,
        report.imports.len(),
        report.type_declarations.len(),
        report.calls.len()
    );
    Ok(report)
}
