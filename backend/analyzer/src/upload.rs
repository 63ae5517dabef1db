use std::{fs, path::Path};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use scores::remote::ImagePart;
use tracing::debug;

use crate::error::UploadError;

pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// A picked image, held in memory until another one replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();

        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let bytes = fs::read(path).map_err(|source| UploadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        debug!("Loaded {file_name}, {} bytes", bytes.len());

        Ok(Self::new(file_name, bytes))
    }

    /// Self-contained `data:` URL, usable as an `<img>` source.
    pub fn preview_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            STANDARD.encode(&self.bytes)
        )
    }

    pub fn to_part(&self) -> ImagePart {
        ImagePart {
            bytes: self.bytes.clone(),
            file_name: Some(self.file_name.clone()),
            content_type: Some(self.content_type.clone()),
        }
    }
}

/// Guesses an image type from the file extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" | "jfif" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        "heic" => "image/heic",
        "svg" => "image/svg+xml",
        "tif" | "tiff" => "image/tiff",
        _ => FALLBACK_CONTENT_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::Builder;

    use super::*;

    #[test]
    fn test_content_type() {
        assert_eq!(content_type_for("face.JPG"), "image/jpeg");
        assert_eq!(content_type_for("face.webp"), "image/webp");
        assert_eq!(content_type_for("face"), FALLBACK_CONTENT_TYPE);
        assert_eq!(content_type_for("notes.txt"), FALLBACK_CONTENT_TYPE);
    }

    #[test]
    fn test_preview_url() {
        let upload = Upload::new("dot.png", b"png!".to_vec());

        assert_eq!(upload.preview_url(), "data:image/png;base64,cG5nIQ==");
    }

    #[test]
    fn test_from_path() {
        let mut file = Builder::new().suffix(".jpeg").tempfile().unwrap();
        file.write_all(b"jpeg bytes").unwrap();

        let upload = Upload::from_path(file.path()).unwrap();

        assert_eq!(upload.bytes, b"jpeg bytes");
        assert_eq!(upload.content_type, "image/jpeg");
        assert!(upload.file_name.ends_with(".jpeg"));
    }

    #[test]
    fn test_missing_file() {
        let result = Upload::from_path(Path::new("does/not/exist.png"));

        assert!(matches!(result, Err(UploadError::Read { .. })));
    }
}
