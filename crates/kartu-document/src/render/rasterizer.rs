// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bitmap card renderer — draws a CardRecord into an RGBA image following the
// shared CardLayout geometry. This is the capture side of the preview: the
// webview shows the same layout, the rasterizer produces the pixels that the
// export strategies package.

use std::sync::OnceLock;

use ab_glyph::{Font, FontVec, PxScale};
use image::{DynamicImage, Rgba, RgbaImage, imageops};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use kartu_core::card::{CardRecord, CardVariant, ImagePayload, TextField};
use kartu_core::error::{KartuError, Result};
use tracing::{debug, info, instrument};

use super::font::FontStore;
use super::layout::{CardLayout, Region};

// Palette lifted from the card design.
const HEADER_BG: Rgba<u8> = Rgba([30, 64, 175, 255]);
const HEADER_TAG: Rgba<u8> = Rgba([191, 219, 254, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const NAME_BLUE: Rgba<u8> = Rgba([30, 58, 138, 255]);
const LABEL_GRAY: Rgba<u8> = Rgba([107, 114, 128, 255]);
const BODY_GRAY: Rgba<u8> = Rgba([55, 65, 81, 255]);
const BOX_GRAY: Rgba<u8> = Rgba([229, 231, 235, 255]);
const PHOTO_BORDER: Rgba<u8> = Rgba([191, 219, 254, 255]);
const GRADIENT_TOP: [u8; 3] = [219, 234, 254];
const GRADIENT_BOTTOM: [u8; 3] = [207, 250, 254];

/// Snapshot a card surface into a single bitmap.
///
/// Implementations must be deterministic for a given record and variant;
/// callers serialize captures through the export pipeline's busy flag.
pub trait Rasterizer: Send + Sync {
    fn capture(&self, record: &CardRecord, variant: CardVariant) -> Result<RgbaImage>;
}

/// Production rasterizer drawing with system fonts at a fixed oversampling
/// scale (3x by default, for sharp export output regardless of display scale).
pub struct CardRasterizer {
    scale: u32,
    fonts: OnceLock<FontStore>,
}

impl CardRasterizer {
    pub const DEFAULT_SCALE: u32 = 3;

    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
            fonts: OnceLock::new(),
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Fonts are discovered lazily on the first capture so that application
    /// startup never fails on a machine without fonts — the export does,
    /// with a user-visible error.
    fn fonts(&self) -> Result<&FontStore> {
        if self.fonts.get().is_none() {
            let store = FontStore::discover()?;
            let _ = self.fonts.set(store);
        }
        Ok(self.fonts.get().expect("font store just initialised"))
    }
}

impl Rasterizer for CardRasterizer {
    #[instrument(skip(self, record), fields(scale = self.scale))]
    fn capture(&self, record: &CardRecord, variant: CardVariant) -> Result<RgbaImage> {
        let fonts = self.fonts()?;
        let layout = CardLayout::new(variant, self.scale);
        info!(width = layout.width, height = layout.height, "capturing card");
        let canvas = draw_card(record, variant, &layout, fonts)?;
        debug!("capture complete");
        Ok(canvas)
    }
}

// -- Drawing ------------------------------------------------------------------

fn draw_card(
    record: &CardRecord,
    variant: CardVariant,
    layout: &CardLayout,
    fonts: &FontStore,
) -> Result<RgbaImage> {
    let mut canvas = gradient_background(layout.width, layout.height);

    // Watermark sits behind everything except the background.
    if let (Some(region), Some(payload)) = (layout.watermark, record.watermark.as_ref()) {
        let mark = decode_payload(payload, "watermark")?
            .resize(region.w, region.h, imageops::FilterType::Lanczos3)
            .to_rgba8();
        overlay_faded(&mut canvas, &mark, region, 0.15);
    }

    draw_header(&mut canvas, record, layout, fonts)?;
    draw_photo(&mut canvas, record, layout)?;
    draw_details(&mut canvas, record, layout, fonts);
    draw_qr(&mut canvas, record, layout)?;
    draw_signature(&mut canvas, record, variant, layout, fonts);
    draw_notes(&mut canvas, record, layout, fonts);

    Ok(canvas)
}

/// Soft diagonal gradient matching the preview background.
fn gradient_background(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let t = (x + y) as f32 / (width + height) as f32;
        let channel = |i: usize| {
            let (from, to, local) = if t < 0.5 {
                (GRADIENT_TOP[i] as f32, 255.0, t * 2.0)
            } else {
                (255.0, GRADIENT_BOTTOM[i] as f32, (t - 0.5) * 2.0)
            };
            (from + (to - from) * local).round() as u8
        };
        Rgba([channel(0), channel(1), channel(2), 255])
    })
}

fn draw_header(
    canvas: &mut RgbaImage,
    record: &CardRecord,
    layout: &CardLayout,
    fonts: &FontStore,
) -> Result<()> {
    fill_region(canvas, layout.header, HEADER_BG);
    fill_region(canvas, layout.logo, WHITE);

    if let Some(payload) = record.school_logo.as_ref() {
        let logo_box = layout.logo.inset(2 * layout.scale);
        let logo = decode_payload(payload, "school logo")?.resize(
            logo_box.w,
            logo_box.h,
            imageops::FilterType::Lanczos3,
        );
        let x = logo_box.x as i64 + (logo_box.w - logo.width()) as i64 / 2;
        let y = logo_box.y as i64 + (logo_box.h - logo.height()) as i64 / 2;
        imageops::overlay(canvas, &logo.to_rgba8(), x, y);
    }

    let text_w = (layout.header.x + layout.header.w as i32 - layout.header_text_x) as u32;
    draw_line(
        canvas,
        fonts.bold(),
        layout.card_tag_size,
        HEADER_TAG,
        layout.header_text_x,
        layout.card_tag_y,
        text_w,
        "KARTU TANDA PELAJAR",
    );
    draw_line(
        canvas,
        fonts.bold(),
        layout.school_name_size,
        WHITE,
        layout.header_text_x,
        layout.school_name_y,
        text_w,
        record.display_text(TextField::SchoolName),
    );
    draw_line(
        canvas,
        fonts.regular(),
        layout.school_address_size,
        HEADER_TAG,
        layout.header_text_x,
        layout.school_address_y,
        text_w,
        record.display_text(TextField::SchoolAddress),
    );
    Ok(())
}

fn draw_photo(canvas: &mut RgbaImage, record: &CardRecord, layout: &CardLayout) -> Result<()> {
    fill_region(canvas, layout.photo, PHOTO_BORDER);
    let inner = layout.photo.inset(3 * layout.scale);
    fill_region(canvas, inner, BOX_GRAY);

    if let Some(payload) = record.student_photo.as_ref() {
        let photo = decode_payload(payload, "student photo")?.resize_to_fill(
            inner.w,
            inner.h,
            imageops::FilterType::Lanczos3,
        );
        imageops::overlay(canvas, &photo.to_rgba8(), inner.x as i64, inner.y as i64);
    }
    Ok(())
}

fn draw_details(
    canvas: &mut RgbaImage,
    record: &CardRecord,
    layout: &CardLayout,
    fonts: &FontStore,
) {
    let max_w = layout.width.saturating_sub(layout.detail_x as u32 + 8 * layout.scale);
    draw_line(
        canvas,
        fonts.bold(),
        layout.student_name_size,
        NAME_BLUE,
        layout.student_name_pos.0,
        layout.student_name_pos.1,
        max_w,
        record.display_text(TextField::StudentName),
    );

    let rows = [
        ("NISN", TextField::Nisn),
        ("Kelas", TextField::StudentClass),
        ("Alamat", TextField::StudentAddress),
    ];
    for (i, (label, field)) in rows.iter().enumerate() {
        let y = layout.detail_first_y + i as i32 * layout.detail_line_h as i32;
        draw_line(
            canvas,
            fonts.bold(),
            layout.detail_size,
            LABEL_GRAY,
            layout.detail_x,
            y,
            layout.detail_label_w,
            label,
        );
        let value_x = layout.detail_x + layout.detail_label_w as i32;
        let value_w = max_w.saturating_sub(layout.detail_label_w);
        draw_line(
            canvas,
            fonts.regular(),
            layout.detail_size,
            BODY_GRAY,
            value_x,
            y,
            value_w,
            &format!(": {}", record.display_text(*field)),
        );
    }
}

fn draw_qr(canvas: &mut RgbaImage, record: &CardRecord, layout: &CardLayout) -> Result<()> {
    // Absent QR leaves the box empty, preserving the layout like the preview.
    let Some(payload) = record.qr_code.as_ref() else {
        return Ok(());
    };
    fill_region(canvas, layout.qr, WHITE);
    let inner = layout.qr.inset(2 * layout.scale);
    let qr = decode_payload(payload, "QR code")?.resize(
        inner.w,
        inner.h,
        imageops::FilterType::Lanczos3,
    );
    let x = inner.x as i64 + (inner.w - qr.width()) as i64 / 2;
    let y = inner.y as i64 + (inner.h - qr.height()) as i64 / 2;
    imageops::overlay(canvas, &qr.to_rgba8(), x, y);
    Ok(())
}

fn draw_signature(
    canvas: &mut RgbaImage,
    record: &CardRecord,
    variant: CardVariant,
    layout: &CardLayout,
    fonts: &FontStore,
) {
    let block = layout.signature;
    let size = layout.signature_size;
    let line_h = (size * 1.4).round() as i32;
    let mut y = block.y;

    if variant.has_issuance_block() {
        let issued = format!(
            "{}, {} {} {}",
            record.display_text(TextField::PlaceOfIssue),
            record.display_text(TextField::IssueDay),
            record.display_text(TextField::IssueMonth),
            record.display_text(TextField::IssueYear),
        );
        draw_centered(canvas, fonts.regular(), size, BODY_GRAY, &block, y, &issued);
        y += line_h;
    }

    draw_centered(canvas, fonts.regular(), size, BODY_GRAY, &block, y, "Mengetahui,");
    y += line_h;
    draw_centered(canvas, fonts.regular(), size, BODY_GRAY, &block, y, "Kepala Sekolah");

    // Space left blank for the hand-written signature.
    y += line_h + 26 * layout.scale as i32;

    let name = fit_text(
        fonts.bold(),
        size,
        block.w,
        record.display_text(TextField::PrincipalName),
    );
    draw_centered(canvas, fonts.bold(), size, BODY_GRAY, &block, y, &name);

    // Underline beneath the principal name.
    let underline_y = y + line_h;
    fill_region(
        canvas,
        Region::new(block.x, underline_y, block.w, layout.scale.max(1)),
        BODY_GRAY,
    );

    let nip = format!("NIP. {}", record.display_text(TextField::PrincipalNip));
    draw_centered(
        canvas,
        fonts.regular(),
        size,
        BODY_GRAY,
        &block,
        underline_y + 3 * layout.scale as i32,
        &nip,
    );
}

fn draw_notes(canvas: &mut RgbaImage, record: &CardRecord, layout: &CardLayout, fonts: &FontStore) {
    let text = format!("Catatan: {}", record.display_text(TextField::Notes));
    let max_w = layout.width.saturating_sub(layout.notes_pos.0 as u32 * 2);
    draw_line(
        canvas,
        fonts.regular(),
        layout.notes_size,
        LABEL_GRAY,
        layout.notes_pos.0,
        layout.notes_pos.1,
        max_w,
        &text,
    );
}

// -- Primitives ---------------------------------------------------------------

fn fill_region(canvas: &mut RgbaImage, region: Region, color: Rgba<u8>) {
    if region.w == 0 || region.h == 0 {
        return;
    }
    draw_filled_rect_mut(
        canvas,
        Rect::at(region.x, region.y).of_size(region.w, region.h),
        color,
    );
}

/// Draw one line of text, truncated with an ellipsis to fit `max_w`.
#[allow(clippy::too_many_arguments)]
fn draw_line(
    canvas: &mut RgbaImage,
    font: &FontVec,
    size: f32,
    color: Rgba<u8>,
    x: i32,
    y: i32,
    max_w: u32,
    text: &str,
) {
    let fitted = fit_text(font, size, max_w, text);
    draw_text_mut(canvas, color, x, y, PxScale::from(size), font, &fitted);
}

/// Draw one line centred horizontally inside `block`.
fn draw_centered(
    canvas: &mut RgbaImage,
    font: &FontVec,
    size: f32,
    color: Rgba<u8>,
    block: &Region,
    y: i32,
    text: &str,
) {
    let fitted = fit_text(font, size, block.w, text);
    let (tw, _) = text_size(PxScale::from(size), font, &fitted);
    let x = block.center_x() - (tw as i32) / 2;
    draw_text_mut(canvas, color, x, y, PxScale::from(size), font, &fitted);
}

/// Truncate `text` so it renders within `max_w` pixels, appending an ellipsis
/// when anything was cut. Long field content must never distort the card.
fn fit_text(font: &impl Font, size: f32, max_w: u32, text: &str) -> String {
    let scale = PxScale::from(size);
    let (w, _) = text_size(scale, font, text);
    if (w as i64) <= max_w as i64 {
        return text.to_string();
    }

    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let mut candidate: String = chars.iter().collect();
        candidate.push('\u{2026}');
        let (w, _) = text_size(scale, font, &candidate);
        if (w as i64) <= max_w as i64 {
            return candidate;
        }
    }
    String::new()
}

/// Alpha-blend `mark` over the canvas at reduced opacity.
fn overlay_faded(canvas: &mut RgbaImage, mark: &RgbaImage, region: Region, opacity: f32) {
    // Centre the (aspect-preserved) mark within its box.
    let offset_x = region.x + (region.w.saturating_sub(mark.width())) as i32 / 2;
    let offset_y = region.y + (region.h.saturating_sub(mark.height())) as i32 / 2;

    for (mx, my, pixel) in mark.enumerate_pixels() {
        let cx = offset_x + mx as i32;
        let cy = offset_y + my as i32;
        if cx < 0 || cy < 0 || cx >= canvas.width() as i32 || cy >= canvas.height() as i32 {
            continue;
        }
        let alpha = (pixel[3] as f32 / 255.0) * opacity;
        let dst = canvas.get_pixel_mut(cx as u32, cy as u32);
        for c in 0..3 {
            dst[c] = (dst[c] as f32 * (1.0 - alpha) + pixel[c] as f32 * alpha).round() as u8;
        }
    }
}

fn decode_payload(payload: &ImagePayload, what: &str) -> Result<DynamicImage> {
    let bytes = payload.decode()?;
    image::load_from_memory(&bytes)
        .map_err(|err| KartuError::Raster(format!("failed to decode {what} image: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kartu_core::card::{ImageField, ImageMime};

    fn test_fonts() -> Option<FontStore> {
        FontStore::discover().ok()
    }

    fn png_payload(color: [u8; 4]) -> ImagePayload {
        let img = RgbaImage::from_pixel(8, 8, Rgba(color));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        ImagePayload::from_encoded(ImageMime::Png, &bytes)
    }

    #[test]
    fn capture_matches_layout_dimensions() {
        // Skipped on machines without a discoverable font.
        let Some(_) = test_fonts() else { return };

        let rasterizer = CardRasterizer::new(3);
        let record = CardRecord::new();
        let bitmap = rasterizer.capture(&record, CardVariant::Classic).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (512 * 3, 323 * 3));

        let bitmap = rasterizer.capture(&record, CardVariant::Wide).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (540 * 3, 340 * 3));
    }

    #[test]
    fn capture_is_deterministic() {
        let Some(_) = test_fonts() else { return };

        let rasterizer = CardRasterizer::new(2);
        let record = CardRecord::new()
            .with_text(TextField::StudentName, "Ani")
            .with_image(ImageField::QrCode, png_payload([0, 0, 0, 255]));

        let a = rasterizer.capture(&record, CardVariant::Classic).unwrap();
        let b = rasterizer.capture(&record, CardVariant::Classic).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn header_band_is_painted() {
        let Some(_) = test_fonts() else { return };

        let rasterizer = CardRasterizer::new(1);
        let bitmap = rasterizer
            .capture(&CardRecord::new(), CardVariant::Classic)
            .unwrap();
        let layout = CardLayout::new(CardVariant::Classic, 1);
        // Sample just inside the header, away from the logo box and text.
        let x = (layout.header.x + layout.header.w as i32 - 4) as u32;
        let y = (layout.header.y + 2) as u32;
        assert_eq!(*bitmap.get_pixel(x, y), HEADER_BG);
    }

    #[test]
    fn corrupt_payload_fails_capture() {
        let Some(_) = test_fonts() else { return };

        let rasterizer = CardRasterizer::new(1);
        let record = CardRecord::new().with_image(
            ImageField::StudentPhoto,
            ImagePayload::from_encoded(ImageMime::Png, b"definitely not a png"),
        );
        let err = rasterizer.capture(&record, CardVariant::Classic).unwrap_err();
        assert!(matches!(err, KartuError::Raster(_)));
    }

    #[test]
    fn fit_text_truncates_with_ellipsis() {
        let Some(fonts) = test_fonts() else { return };

        let long = "Jalan Merdeka Barat Nomor Seratus Dua Puluh Tiga, Jakarta Pusat";
        let fitted = fit_text(fonts.regular(), 12.0, 80, long);
        assert!(fitted.ends_with('\u{2026}'));
        assert!(fitted.chars().count() < long.chars().count());

        let short = fit_text(fonts.regular(), 12.0, 10_000, "Ani");
        assert_eq!(short, "Ani");
    }
}
