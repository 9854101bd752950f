use log::{debug, info};
use std::fs;

use threeshake_core::{DependencySet, Error, Result};

use crate::{
    constant_table::scan_constants,
    options::EntryOptions,
    synth::synthesize,
    walker::{CONSTANTS_FILE, walk_index},
};

/// Builds the minimal entry module re-exporting `dependencies` from the
/// library, plus the modules it always needs.
///
/// The result is meant to be saved next to the library's own root index
/// (inside its `src/`), since every path in it is relative to that folder.
pub fn generate_entry<S: AsRef<str>>(dependencies: &[S], opts: &EntryOptions) -> Result<String> {
    info!("Generating entry for {} requested names", dependencies.len());
    let deps: DependencySet = dependencies.iter().map(|dep| dep.as_ref()).collect();

    let src_dir = opts.source_dir()?;
    let constants_path = src_dir.join(CONSTANTS_FILE);
    let constants_text =
        fs::read_to_string(&constants_path).map_err(|e| Error::io(&constants_path, e))?;
    let constants = scan_constants(&constants_text);

    let blocks = walk_index(&src_dir)?;
    let entry = synthesize(&blocks, &deps, &constants, opts);

    debug!("Synthesized entry with {} statements", entry.lines().count());
    Ok(entry)
}
