use std::fmt;

/// Binary image formats recognised from their leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormatTag {
    Png,
    Jpeg,
    Gif,
    WebP,
    Bmp,
}

impl ImageFormatTag {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormatTag::Png => "png",
            ImageFormatTag::Jpeg => "jpg",
            ImageFormatTag::Gif => "gif",
            ImageFormatTag::WebP => "webp",
            ImageFormatTag::Bmp => "bmp",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormatTag::Png => "image/png",
            ImageFormatTag::Jpeg => "image/jpeg",
            ImageFormatTag::Gif => "image/gif",
            ImageFormatTag::WebP => "image/webp",
            ImageFormatTag::Bmp => "image/bmp",
        }
    }
}

impl fmt::Display for ImageFormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Classifies `bytes` by magic number. Signatures are checked in a fixed
/// order and the first match wins; fewer than 4 bytes is never a match.
pub fn detect_image_format(bytes: &[u8]) -> Option<ImageFormatTag> {
    if bytes.len() < 4 {
        return None;
    }
    if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return Some(ImageFormatTag::Png);
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some(ImageFormatTag::Jpeg);
    }
    if bytes.starts_with(b"GIF8") {
        return Some(ImageFormatTag::Gif);
    }
    if bytes.len() > 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some(ImageFormatTag::WebP);
    }
    if bytes.starts_with(b"BM") {
        return Some(ImageFormatTag::Bmp);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{ImageFormatTag, detect_image_format};

    #[test]
    fn detects_minimal_signatures() {
        assert_eq!(
            detect_image_format(&[0x89, b'P', b'N', b'G']),
            Some(ImageFormatTag::Png)
        );
        assert_eq!(
            detect_image_format(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some(ImageFormatTag::Jpeg)
        );
        assert_eq!(detect_image_format(b"GIF89a"), Some(ImageFormatTag::Gif));
        assert_eq!(detect_image_format(b"BM\0\0"), Some(ImageFormatTag::Bmp));
    }

    #[test]
    fn webp_needs_more_than_twelve_bytes() {
        assert_eq!(detect_image_format(b"RIFF\0\0\0\0WEBP"), None);
        assert_eq!(
            detect_image_format(b"RIFF\0\0\0\0WEBPVP8 "),
            Some(ImageFormatTag::WebP)
        );
    }

    #[test]
    fn riff_without_webp_marker_is_unknown() {
        assert_eq!(detect_image_format(b"RIFF\0\0\0\0WAVEfmt "), None);
    }

    #[test]
    fn short_or_unrecognised_input_is_unknown() {
        assert_eq!(detect_image_format(&[]), None);
        assert_eq!(detect_image_format(b"BM"), None);
        assert_eq!(detect_image_format(&[0x00, 0x01]), None);
        assert_eq!(detect_image_format(b"%PDF-1.7"), None);
    }

    #[test]
    fn tags_map_to_extensions_and_mime_types() {
        assert_eq!(ImageFormatTag::Jpeg.extension(), "jpg");
        assert_eq!(ImageFormatTag::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(ImageFormatTag::WebP.to_string(), "webp");
    }
}
