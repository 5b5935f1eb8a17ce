// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF assembly — wrap a captured card bitmap into a single-page document at
// the physical ID-1 card size, using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use kartu_core::card::{CARD_HEIGHT_MM, CARD_WIDTH_MM};
use kartu_core::error::{KartuError, Result};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument};

/// Wrap a captured bitmap into a finished PDF byte stream.
pub trait PdfBuilder: Send + Sync {
    fn build(&self, png_bytes: &[u8]) -> Result<Vec<u8>>;
}

/// Single-page, landscape, full-bleed card PDF at 85.6mm x 53.98mm.
pub struct CardPdfBuilder {
    title: String,
}

impl CardPdfBuilder {
    pub fn new() -> Self {
        Self {
            title: "Kartu Pelajar".into(),
        }
    }

    /// Page dimensions in printpdf's Mm units (landscape: width > height).
    fn page_dimensions(&self) -> (Mm, Mm) {
        (Mm(CARD_WIDTH_MM), Mm(CARD_HEIGHT_MM))
    }
}

impl Default for CardPdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfBuilder for CardPdfBuilder {
    #[instrument(skip(self, png_bytes), fields(bytes_len = png_bytes.len()))]
    fn build(&self, png_bytes: &[u8]) -> Result<Vec<u8>> {
        let (page_w, page_h) = self.page_dimensions();

        info!("assembling card PDF");

        // Decode the capture to get dimensions and pixel data.
        let dynamic_image = image::load_from_memory(png_bytes)
            .map_err(|err| KartuError::Pdf(format!("failed to decode capture for PDF: {err}")))?;

        let img_width = dynamic_image.width() as usize;
        let img_height = dynamic_image.height() as usize;

        // Convert to RGB8 for printpdf.
        let rgb_image = dynamic_image.to_rgb8();
        let raw = RawImage {
            pixels: RawImageData::U8(rgb_image.into_raw()),
            width: img_width,
            height: img_height,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };

        let mut doc = PdfDocument::new(&self.title);
        let xobject_id = doc.add_image(&raw);

        // Full bleed: stretch the capture to cover the page exactly. At
        // 72 dpi one image pixel maps to one PDF point, so the scale factors
        // are simply page-points over image-pixels per axis.
        let dpi: f32 = 72.0;
        let page_w_pt = page_w.into_pt().0;
        let page_h_pt = page_h.into_pt().0;
        let scale_x = page_w_pt / img_width as f32;
        let scale_y = page_h_pt / img_height as f32;

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(0.0)),
                translate_y: Some(Pt(0.0)),
                scale_x: Some(scale_x),
                scale_y: Some(scale_y),
                dpi: Some(dpi),
                rotate: None,
            },
        }];

        let page = PdfPage::new(page_w, page_h, ops);
        doc.with_pages(vec![page]);

        debug!(scale_x, scale_y, "capture placed full-bleed");

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn capture_png(w: u32, h: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, Rgba([100, 120, 200, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn produces_a_pdf_byte_stream() {
        let pdf = CardPdfBuilder::new().build(&capture_png(512, 323)).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        // The capture is embedded, so the output must be substantial.
        assert!(pdf.len() > 500);
    }

    #[test]
    fn rejects_non_image_input() {
        let err = CardPdfBuilder::new().build(b"not a png").unwrap_err();
        assert!(matches!(err, KartuError::Pdf(_)));
    }

    #[test]
    fn page_is_landscape_card_sized() {
        let builder = CardPdfBuilder::new();
        let (w, h) = builder.page_dimensions();
        assert!(w.0 > h.0);
        assert!((w.0 - 85.6).abs() < f32::EPSILON);
        assert!((h.0 - 53.98).abs() < f32::EPSILON);
    }
}
