use std::io::Cursor;
use std::path::Path;

use bytes::Bytes;
use image::io::Reader;
use image::ImageFormat;
use log::debug;

use crate::models::errors::PreviewError;

/// A local image picked for upload.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub src: String,
    pub mime: String,
    pub width: u32,
    pub height: u32,
}

impl ImageFile {
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, PreviewError> {
        let path = path.as_ref();
        let bytes = Bytes::from(tokio::fs::read(path).await?);
        let file_name = path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Self::from_bytes(file_name, bytes)
    }

    pub fn from_bytes(file_name: String, bytes: Bytes) -> Result<Self, PreviewError> {
        let format = image::guess_format(&bytes)?;
        let mime = mime_type(format).ok_or(PreviewError::Unsupported(format))?;
        Ok(Self { file_name, mime: mime.to_string(), bytes })
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reads only the header, the pixels are never decoded.
    pub fn preview(&self, src: String) -> Result<Preview, PreviewError> {
        let (width, height) = Reader::new(Cursor::new(&self.bytes[..]))
            .with_guessed_format()?
            .into_dimensions()?;
        debug!("preview {} {}x{}", self.file_name, width, height);

        Ok(Preview { src, mime: self.mime.clone(), width, height })
    }
}

fn mime_type(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::WebP => Some("image/webp"),
        ImageFormat::Gif => Some("image/gif"),
        _ => None,
    }
}
