use ignore::WalkBuilder;
use log::{debug, trace};
use std::path::PathBuf;

use crate::{constants::JS_TS_EXTENSIONS, error::Result};

pub struct CollectorConfig {
    pub root: PathBuf,
    /// Descend into `node_modules` folders, which are skipped otherwise
    pub include_node_modules: bool,
}

/// Collects the JS/TS source files under `cfg.root`, sorted by path.
pub fn collect_sources(cfg: &CollectorConfig) -> Result<Vec<PathBuf>> {
    debug!("Collecting source files");
    let mut files: Vec<PathBuf> = Vec::new();
    let root = &cfg.root;
    let include_node_modules = cfg.include_node_modules;
    debug!("Walking directory tree from root: {}", root.display());

    // node_modules is usually git-ignored, so a deep walk has to bypass .gitignore
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .ignore(true)
        .git_ignore(!include_node_modules)
        .filter_entry(move |dent| {
            let name = dent.file_name();
            name != ".git" && (include_node_modules || name != "node_modules")
        })
        .build();

    for res in walker {
        let dent = res?;
        let p = dent.path();
        if !p.is_file() {
            continue;
        }

        // Skip test files (*.test.*, *.spec.*)
        let path_str = p.to_string_lossy();
        if path_str.contains(".test.") || path_str.contains(".spec.") {
            trace!("Skipping test file: {}", path_str);
            continue;
        }

        if let Some(ext) = p.extension().and_then(|e| e.to_str())
            && JS_TS_EXTENSIONS.contains(&ext)
        {
            trace!("Found source file: {}", p.display());
            files.push(p.to_path_buf());
        }
    }

    files.sort();
    debug!("Collected {} source files", files.len());
    Ok(files)
}
