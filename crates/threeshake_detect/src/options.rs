use oxc_span::SourceType;
use std::path::{Path, PathBuf};

use threeshake_core::{DEFAULT_GLOBAL_NAME, DEFAULT_MODULE_NAME};

/// Options shared by the global-usage and module-import detectors.
#[derive(Debug, Clone)]
pub struct DetectOptions {
    /// Module specifier the library is imported under
    pub module_name: String,
    /// Global binding the library is exposed as in script builds
    pub global_name: String,
    /// File the code came from; picks the parser dialect and names errors
    pub filename: Option<PathBuf>,
    /// Explicit parser dialect, overriding the one derived from `filename`
    pub source_type: Option<SourceType>,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            module_name: DEFAULT_MODULE_NAME.to_string(),
            global_name: DEFAULT_GLOBAL_NAME.to_string(),
            filename: None,
            source_type: None,
        }
    }
}

impl DetectOptions {
    pub fn with_filename(mut self, filename: impl Into<PathBuf>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub(crate) fn source_type(&self) -> SourceType {
        if let Some(st) = self.source_type {
            return st;
        }
        match &self.filename {
            Some(path) => source_type_for(path),
            None => SourceType::default().with_module(true),
        }
    }

    pub(crate) fn display_name(&self) -> String {
        self.filename
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<input>".to_string())
    }
}

fn source_type_for(path: &Path) -> SourceType {
    let ext = path.extension().and_then(|e| e.to_str());

    // CommonJS extensions parse as scripts, everything else as ES modules
    SourceType::default()
        .with_jsx(matches!(ext, Some("tsx") | Some("jsx")))
        .with_typescript(matches!(ext, Some("ts") | Some("tsx") | Some("mts") | Some("cts")))
        .with_module(!matches!(ext, Some("cjs") | Some("cts")))
}
