use crate::error::AppError;
use base64::{engine::general_purpose, Engine as _};
use image::ImageFormat;
use std::path::Path;

/// An uploaded image ready to be sent to the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub file_name: String,
    pub mime_type: String,
    /// Standard base64, no `data:` prefix
    pub data_base64: String,
}

impl ImagePayload {
    pub fn from_bytes(file_name: &str, bytes: &[u8]) -> Result<Self, AppError> {
        if bytes.is_empty() {
            return Err(AppError::UnsupportedImage(format!("{} is empty", file_name)));
        }

        let mime_type = detect_mime_type(file_name, bytes)?;
        Ok(Self {
            file_name: file_name.to_string(),
            mime_type,
            data_base64: general_purpose::STANDARD.encode(bytes),
        })
    }

    /// Build from base64 sent by the front end. Accepts a full `data:` URL as well.
    pub fn from_base64(file_name: &str, data: &str) -> Result<Self, AppError> {
        let raw = match data.split_once(";base64,") {
            Some((prefix, rest)) if prefix.starts_with("data:") => rest,
            _ => data,
        };

        let bytes = general_purpose::STANDARD
            .decode(raw.trim())
            .map_err(|e| AppError::UnsupportedImage(format!("{}: invalid base64: {}", file_name, e)))?;

        Self::from_bytes(file_name, &bytes)
    }

    /// `data:` URL used as the card image source
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data_base64)
    }
}

/// Sniff the MIME type from magic bytes, falling back to the file extension
fn detect_mime_type(file_name: &str, bytes: &[u8]) -> Result<String, AppError> {
    if let Ok(format) = image::guess_format(bytes) {
        return Ok(format.to_mime_type().to_string());
    }

    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    // Formats the image crate does not know but the model accepts
    match ext.as_str() {
        "heic" => return Ok("image/heic".to_string()),
        "heif" => return Ok("image/heif".to_string()),
        _ => {}
    }

    ImageFormat::from_extension(&ext)
        .map(|f| f.to_mime_type().to_string())
        .ok_or_else(|| AppError::UnsupportedImage(format!("{} is not a recognized image", file_name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'];

    #[test]
    fn test_detects_png_from_magic_bytes() {
        let payload = ImagePayload::from_bytes("photo.bin", PNG_MAGIC).unwrap();
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(payload.file_name, "photo.bin");
    }

    #[test]
    fn test_magic_bytes_win_over_extension() {
        let payload = ImagePayload::from_bytes("photo.png", JPEG_MAGIC).unwrap();
        assert_eq!(payload.mime_type, "image/jpeg");
    }

    #[test]
    fn test_heic_by_extension() {
        let payload = ImagePayload::from_bytes("IMG_0001.HEIC", b"\0\0\0\x18ftypheic").unwrap();
        assert_eq!(payload.mime_type, "image/heic");
    }

    #[test]
    fn test_unknown_file_rejected() {
        let result = ImagePayload::from_bytes("notes.txt", b"hello world");
        assert!(matches!(result, Err(AppError::UnsupportedImage(_))));
    }

    #[test]
    fn test_empty_file_rejected() {
        let result = ImagePayload::from_bytes("empty.png", b"");
        assert!(matches!(result, Err(AppError::UnsupportedImage(_))));
    }

    #[test]
    fn test_from_base64_plain_and_data_url() {
        let encoded = general_purpose::STANDARD.encode(PNG_MAGIC);

        let plain = ImagePayload::from_base64("a.png", &encoded).unwrap();
        let url = ImagePayload::from_base64("a.png", &format!("data:image/png;base64,{}", encoded)).unwrap();

        assert_eq!(plain, url);
        assert_eq!(plain.data_base64, encoded);
    }

    #[test]
    fn test_from_base64_invalid() {
        let result = ImagePayload::from_base64("a.png", "!!!not base64!!!");
        assert!(matches!(result, Err(AppError::UnsupportedImage(_))));
    }

    #[test]
    fn test_data_url() {
        let payload = ImagePayload::from_bytes("a.png", PNG_MAGIC).unwrap();
        assert!(payload.data_url().starts_with("data:image/png;base64,iVBORw0KGgo"));
    }
}
