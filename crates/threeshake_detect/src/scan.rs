use dashmap::DashMap;
use log::{debug, info, trace, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::{
    collections::HashSet,
    fs,
    path::{Component, Path, PathBuf},
    thread,
};

use threeshake_core::{CollectorConfig, DependencySet, Error, Result, collect_sources};

use crate::{global::detect_global_deps, imports::detect_deps, options::DetectOptions};

#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Project directory to collect sources from
    pub root: PathBuf,
    /// Installed library directory; its own sources are never scanned
    pub library_root: Option<PathBuf>,
    /// Use global-usage detection for the project's own files
    pub loose: bool,
    /// Also scan `node_modules` (with global-usage detection)
    pub deep: bool,
    /// Scan files under the library's `examples/` tree (with global-usage detection)
    pub examples: bool,
    /// Names removed from the merged result
    pub ignore_dependencies: Vec<String>,
    /// Names appended to the merged result
    pub include_dependencies: Vec<String>,
    pub detect: DetectOptions,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            library_root: None,
            loose: false,
            deep: false,
            examples: true,
            ignore_dependencies: Vec::new(),
            include_dependencies: Vec::new(),
            detect: DetectOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub dependencies: Vec<String>,
    /// Files read and considered for detection
    pub files_analyzed: usize,
    /// Files that mentioned the library and went through a detector
    pub files_matched: usize,
}

/// Detector a file is run through, decided per file from the scan config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanMode {
    Skip,
    Globals,
    Imports,
}

/// Per-file results keyed by path and the detector that produced them.
pub type ScanCache = DashMap<(PathBuf, ScanMode), Option<DependencySet>>;

/// Collects the sources under `cfg.root` and scans them.
///
/// When example search is on, the library's `examples/` tree is collected as
/// well, even if it sits in a `node_modules` folder a shallow walk skips.
pub fn scan_project(cfg: &ScanConfig) -> Result<ScanResult> {
    info!("Starting dependency scan");
    let root = cfg.root.canonicalize().unwrap_or_else(|_| cfg.root.clone());
    info!("Using root directory: {}", root.display());

    let collector_cfg = CollectorConfig { root: root.clone(), include_node_modules: cfg.deep };
    let mut files = collect_sources(&collector_cfg)?;

    if cfg.examples
        && let Some(library_root) = &cfg.library_root
    {
        let examples = library_root.join("examples");
        if examples.is_dir() {
            debug!("Collecting library examples from {}", examples.display());
            let examples_cfg = CollectorConfig { root: examples, include_node_modules: true };
            files.extend(collect_sources(&examples_cfg)?);
            files.sort();
            files.dedup();
        }
    }

    if files.is_empty() {
        warn!("No source files found under {}", root.display());
    }

    let cache = ScanCache::new();
    Ok(scan_files(&files, &ScanConfig { root, ..cfg.clone() }, &cache))
}

/// Scans `files` in parallel and merges their dependencies in file order.
///
/// Files that cannot be read or parsed are logged and skipped. Results are
/// memoized in `cache` by path and detector, so one cache can serve scans
/// with different configs.
pub fn scan_files(files: &[PathBuf], cfg: &ScanConfig, cache: &ScanCache) -> ScanResult {
    info!("Processing {} files in parallel", files.len());

    let per_file: Vec<(&PathBuf, ScanMode, Option<DependencySet>)> = files
        .par_iter()
        .map(|file| {
            let thread_id = thread::current().id();
            trace!("Thread {:?} processing: {}", thread_id, file.display());

            let mode = mode_for(cfg, file);
            if mode == ScanMode::Skip {
                trace!("Skipping {}", file.display());
                return (file, mode, None);
            }

            let key = (file.clone(), mode);
            if let Some(cached) = cache.get(&key) {
                trace!("Cache hit for scan: {}", file.display());
                return (file, mode, cached.clone());
            }

            let result = match scan_file(cfg, file, mode) {
                Ok(deps) => deps,
                Err(e) => {
                    warn!("Skipping {}: {}", file.display(), e);
                    None
                }
            };
            cache.insert(key, result.clone());
            (file, mode, result)
        })
        .collect();

    let mut analyzed = HashSet::new();
    let mut matched = HashSet::new();
    let mut dependencies = DependencySet::new();
    for (file, mode, deps) in per_file {
        if mode == ScanMode::Skip {
            continue;
        }
        analyzed.insert(file);
        if let Some(deps) = deps {
            matched.insert(file);
            dependencies.extend(deps);
        }
    }
    apply_overrides(&mut dependencies, cfg);

    info!(
        "Dependency scan complete. Found {} dependencies in {} of {} files",
        dependencies.len(),
        matched.len(),
        analyzed.len()
    );
    ScanResult {
        dependencies: dependencies.into_vec(),
        files_analyzed: analyzed.len(),
        files_matched: matched.len(),
    }
}

fn scan_file(cfg: &ScanConfig, file: &Path, mode: ScanMode) -> Result<Option<DependencySet>> {
    let code = fs::read_to_string(file).map_err(|e| Error::io(file, e))?;

    // Only run on code that mentions the library somewhere
    if !code.contains(&cfg.detect.global_name) && !code.contains(&cfg.detect.module_name) {
        trace!("No mention of the library in {}", file.display());
        return Ok(None);
    }

    let opts = cfg.detect.clone().with_filename(file);
    let deps = match mode {
        ScanMode::Globals => detect_global_deps(&code, &opts),
        ScanMode::Imports => detect_deps(&code, &opts)?,
        ScanMode::Skip => return Ok(None),
    };
    debug!("{} dependencies in {}", deps.len(), file.display());
    Ok(Some(deps))
}

fn mode_for(cfg: &ScanConfig, file: &Path) -> ScanMode {
    if let Some(library_root) = &cfg.library_root
        && file.starts_with(library_root)
    {
        if file.starts_with(library_root.join("examples")) {
            return if cfg.examples { ScanMode::Globals } else { ScanMode::Skip };
        }
        return ScanMode::Skip;
    }

    let relative = file.strip_prefix(&cfg.root).unwrap_or(file);
    let in_node_modules =
        relative.components().any(|c| c == Component::Normal("node_modules".as_ref()));
    if in_node_modules {
        return if cfg.deep { ScanMode::Globals } else { ScanMode::Skip };
    }

    if cfg.loose { ScanMode::Globals } else { ScanMode::Imports }
}

/// Removes ignored names, then appends included names not already present.
fn apply_overrides(deps: &mut DependencySet, cfg: &ScanConfig) {
    if !cfg.ignore_dependencies.is_empty() {
        deps.retain(|dep| !cfg.ignore_dependencies.iter().any(|ignored| ignored == dep));
    }
    deps.extend(cfg.include_dependencies.iter().map(String::as_str));
}
