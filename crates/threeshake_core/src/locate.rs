use log::{debug, trace, warn};
use path_clean::clean;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct PackageManifest {
    name: Option<String>,
    version: Option<String>,
}

/// Finds the installed package directory for `module`, walking up from
/// `basedir` through each `node_modules` folder like Node's resolver does.
pub fn locate_library(basedir: &Path, module: &str) -> Result<PathBuf> {
    let start = basedir.canonicalize().unwrap_or_else(|_| basedir.to_path_buf());
    trace!("Walking up from {:?} to find node_modules for '{}'", start, module);

    let mut current_dir = Some(start.as_path());
    while let Some(dir) = current_dir {
        if let Some(found) = package_in(dir, module) {
            debug!("Located '{}' at {}", module, found.display());
            return Ok(found);
        }
        current_dir = dir.parent();
    }

    debug!("Could not find '{}' above {}", module, start.display());
    Err(Error::LibraryNotFound { module: module.to_string(), basedir: start })
}

fn package_in(dir: &Path, module: &str) -> Option<PathBuf> {
    let pkg_dir = dir.join("node_modules").join(module);
    let pkg_json = pkg_dir.join("package.json");
    if !pkg_json.is_file() {
        trace!("No package.json at: {:?}", pkg_json);
        return None;
    }

    let txt = match fs::read_to_string(&pkg_json) {
        Ok(txt) => txt,
        Err(e) => {
            warn!("Failed to read {}: {}", pkg_json.display(), e);
            return None;
        }
    };

    match serde_json::from_str::<PackageManifest>(&txt) {
        Ok(manifest) => {
            debug!(
                "Found package {}@{}",
                manifest.name.as_deref().unwrap_or(module),
                manifest.version.as_deref().unwrap_or("unknown")
            );
            Some(clean(pkg_dir))
        }
        Err(e) => {
            warn!("Ignoring malformed {}: {}", pkg_json.display(), e);
            None
        }
    }
}
