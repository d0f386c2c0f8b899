//! Image normalization
//!
//! Turns caller-supplied images (bare base64, data URIs or raw bytes) into
//! [`ImageData`] ready to be sent as an inline part.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::mime::guess_image_mime;

/// Image MIME types accepted as inline data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImageMimeType {
    #[serde(rename = "image/png")]
    Png,
    #[default]
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/heic")]
    Heic,
    #[serde(rename = "image/heif")]
    Heif,
    #[serde(rename = "image/webp")]
    Webp,
}

impl ImageMimeType {
    const ALL: [Self; 5] = [Self::Png, Self::Jpeg, Self::Heic, Self::Heif, Self::Webp];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Heic => "image/heic",
            Self::Heif => "image/heif",
            Self::Webp => "image/webp",
        }
    }

    /// Case-insensitive suffix match against the MIME strings. Empty or
    /// unmatched formats fall back to JPEG.
    pub fn from_format(format: &str) -> Self {
        let format = format.trim().to_ascii_lowercase();
        if format.is_empty() {
            return Self::Jpeg;
        }
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().ends_with(&format))
            .unwrap_or(Self::Jpeg)
    }
}

impl fmt::Display for ImageMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An image as sent to the API: MIME type plus bare base64 payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub mime_type: ImageMimeType,
    pub data: String,
}

impl ImageData {
    pub fn new(mime_type: ImageMimeType, data: impl Into<String>) -> Self {
        Self {
            mime_type,
            data: data.into(),
        }
    }

    /// Normalize a base64 blob or a `data:image/<fmt>;base64,<data>` URI.
    pub fn from_base64(input: &str) -> Self {
        if is_image_data_uri(input) {
            let (header, payload) = split_data_uri(input);
            let format = header.rsplit('/').next().unwrap_or_default();
            return Self::new(ImageMimeType::from_format(format), payload);
        }

        let payload = input.split_once(',').map_or(input, |(_, data)| data);
        Self::new(ImageMimeType::Jpeg, payload)
    }

    /// Encode raw image bytes, sniffing the MIME type from magic numbers.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mime_type = guess_image_mime(bytes)
            .and_then(|mime| {
                ImageMimeType::ALL
                    .iter()
                    .copied()
                    .find(|m| m.as_str() == mime)
            })
            .unwrap_or(ImageMimeType::Jpeg);
        Self::new(mime_type, STANDARD.encode(bytes))
    }
}

/// Normalize a base64 string or data URI into [`ImageData`].
pub fn as_image_data(input: &str) -> ImageData {
    ImageData::from_base64(input)
}

fn is_image_data_uri(input: &str) -> bool {
    input
        .get(..10)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("data:image"))
}

/// Split a data URI into the header before the first `;` (or first `,`) and
/// the payload after the first `,`.
fn split_data_uri(input: &str) -> (&str, &str) {
    let (before_comma, payload) = match input.split_once(',') {
        Some((head, data)) => (head, data),
        None => (input, input),
    };
    let header = before_comma
        .split_once(';')
        .map_or(before_comma, |(head, _)| head);
    (header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_png() {
        let image = as_image_data("data:image/png;base64,AAA=");
        assert_eq!(image.mime_type, ImageMimeType::Png);
        assert_eq!(image.data, "AAA=");
    }

    #[test]
    fn data_uri_is_case_insensitive() {
        let image = as_image_data("DATA:IMAGE/WEBP;base64,UklG");
        assert_eq!(image.mime_type, ImageMimeType::Webp);
        assert_eq!(image.data, "UklG");
    }

    #[test]
    fn unknown_format_defaults_to_jpeg() {
        let image = as_image_data("data:image/bmp;base64,Qk0=");
        assert_eq!(image.mime_type, ImageMimeType::Jpeg);
        assert_eq!(image.data, "Qk0=");

        let image = as_image_data("data:image/;base64,Qk0=");
        assert_eq!(image.mime_type, ImageMimeType::Jpeg);
    }

    #[test]
    fn bare_base64_with_comma_keeps_tail() {
        let image = as_image_data("junk,BBBB");
        assert_eq!(image.mime_type, ImageMimeType::Jpeg);
        assert_eq!(image.data, "BBBB");
    }

    #[test]
    fn bare_base64_passes_through() {
        let image = as_image_data("/9j/4AAQ");
        assert_eq!(image.mime_type, ImageMimeType::Jpeg);
        assert_eq!(image.data, "/9j/4AAQ");
    }

    #[test]
    fn data_uri_without_semicolon() {
        let image = as_image_data("data:image/heic,AAAA");
        assert_eq!(image.mime_type, ImageMimeType::Heic);
        assert_eq!(image.data, "AAAA");
    }

    #[test]
    fn from_bytes_sniffs_png() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        let image = ImageData::from_bytes(&png);
        assert_eq!(image.mime_type, ImageMimeType::Png);
        assert_eq!(image.data, STANDARD.encode(png));
    }

    #[test]
    fn from_bytes_unknown_defaults_to_jpeg() {
        let image = ImageData::from_bytes(b"not an image");
        assert_eq!(image.mime_type, ImageMimeType::Jpeg);
    }

    #[test]
    fn serializes_as_inline_data() {
        let image = ImageData::new(ImageMimeType::Heif, "QQ==");
        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(json, serde_json::json!({"mimeType": "image/heif", "data": "QQ=="}));
    }
}
