//! Opening the source file.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

/// Failure to open the source file. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("no source file given")]
    MissingPath,

    #[error("cannot find file '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("permission denied reading '{}'", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("error opening '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Open `path` for buffered line reading.
///
/// `None` (no path on the command line) is reported the same way as a
/// missing file.
pub fn open_source(path: Option<&Path>) -> Result<BufReader<File>, OpenError> {
    let path = path.ok_or(OpenError::MissingPath)?;
    match File::open(path) {
        Ok(file) => {
            debug!(path = %path.display(), "opened source file");
            Ok(BufReader::new(file))
        }
        Err(e) => Err(match e.kind() {
            io::ErrorKind::NotFound => OpenError::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => OpenError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => OpenError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        }),
    }
}
