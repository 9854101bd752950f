//! Core utilities for threeshake tools.
//!
//! This crate provides the pieces shared by the dependency detectors and the
//! entry generator:
//! - The ordered, de-duplicated [`DependencySet`]
//! - Comment stripping for best-effort textual analysis
//! - Locating an installed copy of the target library
//! - Collecting project source files to scan
//! - The shared [`Error`] type

mod collector;
mod constants;
mod deps;
mod error;
mod locate;
mod normalize;

// Re-export public API
pub use collector::{CollectorConfig, collect_sources};
pub use constants::{DEFAULT_GLOBAL_NAME, DEFAULT_MODULE_NAME, JS_TS_EXTENSIONS};
pub use deps::DependencySet;
pub use error::{Error, Result};
pub use locate::locate_library;
pub use normalize::{collapse_blank_lines, strip_comments};
