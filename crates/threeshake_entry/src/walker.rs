use log::{debug, trace};
use path_clean::clean;
use std::{
    fs,
    path::{Path, PathBuf},
};

use threeshake_core::{Error, Result};

use crate::{
    grammar::{Statement, parse_statements},
    paths::relative_specifier,
};

/// Root aggregation module inside the library's `src/`
pub const INDEX_FILE: &str = "Three.js";
pub const POLYFILLS_FILE: &str = "polyfills.js";
pub const BUFFER_ATTRIBUTE_FILE: &str = "BufferAttribute.js";
pub const CONSTANTS_FILE: &str = "constants.js";
pub const LEGACY_FILE: &str = "Three.Legacy.js";

/// `export *` targets kept as leaves instead of being expanded.
const IGNORE_RECURSE: &[&str] = &[POLYFILLS_FILE, BUFFER_ATTRIBUTE_FILE, CONSTANTS_FILE, LEGACY_FILE];

/// How a block's inclusion in the entry is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inclusion {
    /// Emitted verbatim regardless of the requested names
    Required,
    /// Emitted with its export list narrowed to the requested names
    Filtered,
    /// Whole-module re-export when any requested name mentions `BufferAttribute`
    BufferAttribute,
    /// Re-export of the requested names found in the constant table
    Constants,
    /// Emitted only when legacy exports are enabled
    Legacy,
    /// Emitted only when the polyfill bootstrap is enabled
    Polyfills,
}

/// One leaf statement of the flattened export graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleBlock {
    /// Statement with its source rewritten relative to the library `src/`
    pub statement: Statement,
    /// Resolved module file, if the statement names one
    pub path: Option<PathBuf>,
    pub file_name: Option<String>,
    pub inclusion: Inclusion,
}

impl ModuleBlock {
    pub(crate) fn new(statement: Statement, path: Option<PathBuf>, src_dir: &Path) -> Self {
        let file_name =
            path.as_ref().and_then(|p| p.file_name()).map(|n| n.to_string_lossy().into_owned());

        let rebased = match (&path, statement.source()) {
            (Some(p), Some(written)) => {
                Some(relative_specifier(p, src_dir).unwrap_or_else(|| written.to_string()))
            }
            _ => None,
        };
        let statement = match rebased {
            Some(source) => statement.with_source(source),
            None => statement,
        };

        let inclusion = match file_name.as_deref() {
            Some(BUFFER_ATTRIBUTE_FILE) => Inclusion::BufferAttribute,
            Some(CONSTANTS_FILE) => Inclusion::Constants,
            Some(LEGACY_FILE) => Inclusion::Legacy,
            Some(POLYFILLS_FILE) => Inclusion::Polyfills,
            _ => match &statement {
                Statement::Named { specifiers, .. } if !specifiers.is_empty() => Inclusion::Filtered,
                _ => Inclusion::Required,
            },
        };

        Self { statement, path, file_name, inclusion }
    }

    /// Module specifier relative to the library `src/`.
    pub fn file(&self) -> Option<&str> {
        self.statement.source()
    }

    pub fn variables(&self) -> Vec<&str> {
        self.statement.exported_names()
    }

    pub fn is_required(&self) -> bool {
        self.inclusion == Inclusion::Required
    }

    pub fn is_modify(&self) -> bool {
        self.inclusion == Inclusion::Filtered
    }
}

/// Flattens the export graph rooted at `<src_dir>/Three.js` into leaf
/// blocks, expanding `export *` statements depth-first in place.
///
/// Fails if any module cannot be read or if a module re-exports itself
/// through a chain of `export *` statements.
pub fn walk_index(src_dir: &Path) -> Result<Vec<ModuleBlock>> {
    let src_dir = clean(src_dir);
    let index = src_dir.join(INDEX_FILE);
    debug!("Walking export graph from {}", index.display());

    let blocks = walk_module(&src_dir, &index, &mut Vec::new(), Vec::new())?;
    debug!("Flattened export graph into {} blocks", blocks.len());
    Ok(blocks)
}

fn walk_module(
    src_dir: &Path,
    file: &Path,
    stack: &mut Vec<PathBuf>,
    mut blocks: Vec<ModuleBlock>,
) -> Result<Vec<ModuleBlock>> {
    if stack.iter().any(|visiting| visiting == file) {
        let mut chain = stack.clone();
        chain.push(file.to_path_buf());
        debug!("Cycle detected at: {}", file.display());
        return Err(Error::Cycle { chain });
    }

    trace!("Parsing module: {}", file.display());
    let text = fs::read_to_string(file).map_err(|e| Error::io(file, e))?;
    let dir = file.parent().unwrap_or(src_dir).to_path_buf();

    stack.push(file.to_path_buf());
    for statement in parse_statements(&text) {
        // Bare specifiers name packages, not files under the library
        let path = statement
            .source()
            .filter(|source| source.starts_with('.'))
            .map(|source| clean(dir.join(source)));

        if let (Statement::Star { .. }, Some(target)) = (&statement, &path)
            && let Some(name) = target.file_name().and_then(|n| n.to_str())
            && !IGNORE_RECURSE.contains(&name)
        {
            trace!("Expanding export * from {}", target.display());
            blocks = walk_module(src_dir, target, stack, blocks)?;
            continue;
        }

        if let Statement::Other(line) = &statement {
            trace!("Keeping unrecognised line verbatim: {}", line);
        }
        blocks.push(ModuleBlock::new(statement, path, src_dir));
    }
    stack.pop();

    Ok(blocks)
}
