//! Generation of a minimal entry module for the library.
//!
//! The library's root index (`src/Three.js`) is a flat list of re-export
//! statements. [`generate_entry`] flattens that graph, keeps only the
//! statements that export a requested name or that the library always needs,
//! and narrows each kept export list to the requested names. The resulting
//! text can stand in for the full index when bundling.
//!
//! # Examples
//!
//! ```no_run
//! use threeshake_entry::{EntryOptions, generate_entry};
//!
//! # fn main() -> threeshake_core::Result<()> {
//! let opts = EntryOptions { legacy: false, polyfills: true, ..Default::default() };
//! let entry = generate_entry(&["WebGLRenderer", "Scene", "RGBAFormat"], &opts)?;
//! println!("{}", entry);
//! # Ok(())
//! # }
//! ```

mod constant_table;
mod generator;
mod grammar;
mod options;
mod paths;
mod synth;
mod walker;

#[cfg(test)]
mod fixtures;

// Re-export public API
pub use constant_table::scan_constants;
pub use generator::generate_entry;
pub use grammar::{ExportSpecifier, Statement, parse_statement, parse_statements};
pub use options::EntryOptions;
pub use synth::synthesize;
pub use walker::{
    BUFFER_ATTRIBUTE_FILE, CONSTANTS_FILE, INDEX_FILE, Inclusion, LEGACY_FILE, ModuleBlock,
    POLYFILLS_FILE, walk_index,
};
