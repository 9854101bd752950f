use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use threeshake_core::strip_comments;

static EXPORT_VAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*export\s+(?:var|let|const)\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=")
        .expect("Invalid regex pattern for exported constants")
});

/// Names declared by top-level `export var|let|const NAME = ...` lines.
pub fn scan_constants(text: &str) -> Vec<String> {
    let names: Vec<String> = strip_comments(text)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| EXPORT_VAR_RE.captures(line).map(|caps| caps[1].to_string()))
        .collect();
    debug!("Scanned {} exported constants", names.len());
    names
}
