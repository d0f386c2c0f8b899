//! MIME type detection utilities

/// Guess an image MIME type, ignoring non-image matches.
pub fn guess_image_mime(bytes: &[u8]) -> Option<String> {
    infer::get(bytes)
        .filter(|k| k.matcher_type() == infer::MatcherType::Image)
        .map(|k| k.mime_type().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    #[test]
    fn sniffs_png() {
        assert_eq!(guess_image_mime(PNG_HEADER).as_deref(), Some("image/png"));
    }

    #[test]
    fn unknown_bytes_have_no_mime() {
        assert_eq!(guess_image_mime(b"plain text"), None);
        assert_eq!(guess_image_mime(&[]), None);
    }

    #[test]
    fn non_image_is_not_an_image() {
        let pdf = b"%PDF-1.4\n";
        assert_eq!(guess_image_mime(pdf), None);
    }
}
