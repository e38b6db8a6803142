use std::io;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct HttpError {
    pub message: String,
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        HttpError { message: err.to_string() }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] io::Error),

    #[error("storage is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("can't read image file: {0}")]
    Io(#[from] io::Error),

    #[error("not a supported image: {0}")]
    Image(#[from] image::ImageError),

    #[error("unsupported image format: {0:?}")]
    Unsupported(image::ImageFormat),
}
