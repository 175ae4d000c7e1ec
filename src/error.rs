use crate::archive_data::error::ArchiveDataError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenMeteoError {
    #[error(transparent)]
    ArchiveData(#[from] ArchiveDataError),

    #[error("Polars operation failed")]
    Polars(#[from] PolarsError),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine cache directory")]
    CacheDirResolution(#[source] std::io::Error),
}
