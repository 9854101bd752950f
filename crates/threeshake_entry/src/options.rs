use log::debug;
use path_clean::clean;
use std::{
    env,
    path::{Path, PathBuf},
};

use threeshake_core::{DEFAULT_MODULE_NAME, Error, Result, locate_library};

#[derive(Debug, Clone)]
pub struct EntryOptions {
    /// Directory to resolve the library from (defaults to the cwd)
    pub basedir: Option<PathBuf>,
    /// Library package directory; located from `basedir` when unset
    pub three_path: Option<PathBuf>,
    /// Re-export the legacy compatibility module
    pub legacy: bool,
    /// Keep the polyfill bootstrap import
    pub polyfills: bool,
    /// Package name used when locating the library
    pub module_name: String,
}

impl Default for EntryOptions {
    fn default() -> Self {
        Self {
            basedir: None,
            three_path: None,
            legacy: false,
            polyfills: true,
            module_name: DEFAULT_MODULE_NAME.to_string(),
        }
    }
}

impl EntryOptions {
    /// The library's `src/` directory, which holds the root index.
    pub fn source_dir(&self) -> Result<PathBuf> {
        let library = match &self.three_path {
            Some(path) => path.clone(),
            None => {
                let basedir = match &self.basedir {
                    Some(dir) => dir.clone(),
                    None => env::current_dir().map_err(|e| Error::io(Path::new("."), e))?,
                };
                locate_library(&basedir, &self.module_name)?
            }
        };
        let src = clean(library.join("src"));
        debug!("Using library sources at {}", src.display());
        Ok(src)
    }
}
