// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion of picked files into self-contained inline image payloads.

use image::ImageFormat;
use kartu_core::card::{ImageMime, ImagePayload};
use kartu_core::error::KartuError;
use tracing::debug;

/// Sniff the image format of raw file bytes and map it onto a payload MIME.
///
/// Formats the renderer cannot display inline (TIFF, ICO, ...) are rejected
/// here rather than failing later at raster time.
pub fn sniff_mime(bytes: &[u8]) -> Result<ImageMime, KartuError> {
    let format = image::guess_format(bytes)
        .map_err(|err| KartuError::ImagePayload(format!("unrecognised image data: {err}")))?;
    match format {
        ImageFormat::Png => Ok(ImageMime::Png),
        ImageFormat::Jpeg => Ok(ImageMime::Jpeg),
        ImageFormat::Gif => Ok(ImageMime::Gif),
        ImageFormat::WebP => Ok(ImageMime::WebP),
        ImageFormat::Bmp => Ok(ImageMime::Bmp),
        other => Err(KartuError::ImagePayload(format!(
            "unsupported image format {other:?}"
        ))),
    }
}

/// Encode the full contents of a picked file as an inline payload.
///
/// The original bytes are kept as-is (no re-encoding) so the payload is
/// bit-faithful to the uploaded file.
pub fn payload_from_bytes(bytes: &[u8]) -> Result<ImagePayload, KartuError> {
    let mime = sniff_mime(bytes)?;
    debug!(mime = mime.as_str(), len = bytes.len(), "encoding upload as inline payload");
    Ok(ImagePayload::from_encoded(mime, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Smallest well-formed 1x1 PNG, generated with the `image` crate.
    fn tiny_png() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn png_bytes_are_sniffed_and_preserved() {
        let bytes = tiny_png();
        let payload = payload_from_bytes(&bytes).unwrap();
        assert_eq!(payload.mime(), ImageMime::Png);
        // Bit-for-bit round trip: no re-encoding happens.
        assert_eq!(payload.decode().unwrap(), bytes);
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let err = payload_from_bytes(b"not an image at all").unwrap_err();
        assert!(matches!(err, KartuError::ImagePayload(_)));
    }
}
