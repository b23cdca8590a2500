use std::path::PathBuf;

use ft_index::IndexError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GtfsError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("no stops.txt or stops.csv under {0}")]
    NoStopFiles(PathBuf),

    #[error("{}: {source}", .path.display())]
    File {
        path:   PathBuf,
        #[source]
        source: Box<GtfsError>,
    },
}

impl GtfsError {
    /// Attach the file the error came from.
    pub(crate) fn in_file(self, path: &std::path::Path) -> Self {
        GtfsError::File { path: path.to_path_buf(), source: Box::new(self) }
    }
}

pub type GtfsResult<T> = Result<T, GtfsError>;
