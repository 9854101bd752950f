//! Detection of the library exports a codebase actually uses.
//!
//! Two detectors produce the same ordered, de-duplicated
//! [`DependencySet`](threeshake_core::DependencySet):
//!
//! - [`detect_deps`] parses a code unit with oxc and follows ES imports and
//!   CommonJS `require` calls of the library module, including member
//!   accesses on a namespace binding.
//! - [`detect_global_deps`] scans text for `THREE.Member` style accesses on a
//!   global binding.
//!
//! [`scan_project`] runs the right detector over every source file of a
//! project and merges the results.
//!
//! # Examples
//!
//! ```
//! use threeshake_detect::{DetectOptions, detect_deps};
//!
//! # fn main() -> threeshake_core::Result<()> {
//! let code = "import * as THREE from 'three';\nnew THREE.Scene();";
//! let deps = detect_deps(code, &DetectOptions::default())?;
//! assert_eq!(deps.as_slice(), ["Scene"]);
//! # Ok(())
//! # }
//! ```

mod global;
mod imports;
mod options;
mod reporter;
mod scan;

// Re-export public API
pub use global::detect_global_deps;
pub use imports::{detect_deps, detect_deps_bytes};
pub use options::DetectOptions;
pub use reporter::{print_no_dependencies_message, print_scan_summary};
pub use scan::{ScanCache, ScanConfig, ScanMode, ScanResult, scan_files, scan_project};
