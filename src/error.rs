use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not open {path}: {source}")]
    Open {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("could not save {path}: {source}")]
    Save {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("{path} has no pixels")]
    EmptyImage { path: PathBuf },

    #[error("unsupported output format for {path} (use .png, .jpg or .jpeg)")]
    UnsupportedFormat { path: PathBuf },

    #[error("no image loaded")]
    NoImage,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
