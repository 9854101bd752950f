use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Errors raised by detection, library location and entry generation.
#[derive(Debug, Error)]
pub enum Error {
    /// Detector input could not be treated as source text.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The parser rejected a code unit. Detection is all-or-nothing per unit.
    #[error("syntax error in {file}: {message}")]
    Syntax { file: String, message: String },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A module was reached again while it was still being expanded.
    #[error("cycle detected in module graph: {}", format_chain(.chain))]
    Cycle { chain: Vec<PathBuf> },

    #[error("could not locate '{module}' in any node_modules above {}", .basedir.display())]
    LibraryNotFound { module: String, basedir: PathBuf },

    #[error(transparent)]
    Walk(#[from] ignore::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn io(path: &Path, source: io::Error) -> Self {
        Error::Io { path: path.to_path_buf(), source }
    }
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_lists_chain() {
        let err = Error::Cycle {
            chain: vec![
                PathBuf::from("/lib/src/Three.js"),
                PathBuf::from("/lib/src/a.js"),
                PathBuf::from("/lib/src/Three.js"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "cycle detected in module graph: /lib/src/Three.js -> /lib/src/a.js -> /lib/src/Three.js"
        );
    }

    #[test]
    fn test_io_message_names_path() {
        let err = Error::io(
            Path::new("/missing/constants.js"),
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/missing/constants.js"));
        assert!(msg.contains("not found"));
    }
}
