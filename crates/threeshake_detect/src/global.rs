use log::{debug, warn};
use regex::Regex;

use threeshake_core::{DependencySet, strip_comments};

use crate::options::DetectOptions;

/// Collects every `<global>.<Member>` access in `code`, in first-seen order.
///
/// Purely textual: there is no scoping, so a local variable that happens to
/// share the global's name is counted too.
pub fn detect_global_deps(code: &str, opts: &DetectOptions) -> DependencySet {
    let code = strip_comments(code);
    let mut deps = DependencySet::new();

    let pattern = format!(r"{}\.([A-Za-z_$][A-Za-z0-9_$]*)", regex::escape(&opts.global_name));
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            warn!("Unusable global name '{}': {}", opts.global_name, e);
            return deps;
        }
    };

    for caps in re.captures_iter(&code) {
        deps.insert(&caps[1]);
    }

    debug!("Found {} global references to {} in {}", deps.len(), opts.global_name, opts.display_name());
    deps
}
