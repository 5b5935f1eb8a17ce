// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Card geometry — pure pixel layout computed from variant and capture scale.
//
// The layout is the single description of where everything sits on the card;
// the webview preview and the bitmap rasterizer both follow it, so a capture
// always matches what the user saw.

use kartu_core::card::CardVariant;

/// An axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Region {
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Horizontal centre of the region.
    pub fn center_x(&self) -> i32 {
        self.x + self.w as i32 / 2
    }

    /// Shrink the region by `inset` pixels on every side.
    pub fn inset(&self, inset: u32) -> Self {
        Self {
            x: self.x + inset as i32,
            y: self.y + inset as i32,
            w: self.w.saturating_sub(2 * inset),
            h: self.h.saturating_sub(2 * inset),
        }
    }
}

/// Complete card geometry at a given oversampling scale.
///
/// Coordinates are derived from the variant design size; multiplying the
/// scale multiplies every coordinate, so a 3x capture is pixel-identical to
/// a 1x render enlarged three times.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub scale: u32,
    pub width: u32,
    pub height: u32,

    /// Solid header band at the top of the card.
    pub header: Region,
    /// White box holding the school logo inside the header.
    pub logo: Region,
    pub header_text_x: i32,
    pub card_tag_y: i32,
    pub school_name_y: i32,
    pub school_address_y: i32,

    /// Bordered student photo box.
    pub photo: Region,

    pub student_name_pos: (i32, i32),
    pub detail_x: i32,
    pub detail_label_w: u32,
    pub detail_first_y: i32,
    pub detail_line_h: u32,

    /// QR code box (left empty when no payload is set).
    pub qr: Region,
    /// Signature block, lines centred horizontally within it.
    pub signature: Region,
    pub notes_pos: (i32, i32),
    /// Translucent watermark box (wide variant only).
    pub watermark: Option<Region>,

    // Text sizes in pixels at this scale.
    pub card_tag_size: f32,
    pub school_name_size: f32,
    pub school_address_size: f32,
    pub student_name_size: f32,
    pub detail_size: f32,
    pub signature_size: f32,
    pub notes_size: f32,
}

impl CardLayout {
    pub fn new(variant: CardVariant, scale: u32) -> Self {
        let scale = scale.max(1);
        let (base_w, base_h) = variant.design_size();
        let s = scale as i32;
        let su = scale;
        let f = scale as f32;
        let w = base_w as i32;
        let h = base_h as i32;

        let right_column_x = 164 * s;
        let signature_w = 180u32;
        let signature_h = if variant.has_issuance_block() { 118u32 } else { 100u32 };
        let signature_y = h - 26 - signature_h as i32;

        Self {
            scale,
            width: base_w * su,
            height: base_h * su,

            header: Region::new(12 * s, 12 * s, (base_w - 24) * su, 66 * su),
            logo: Region::new(20 * s, 21 * s, 48 * su, 48 * su),
            header_text_x: 80 * s,
            card_tag_y: 21 * s,
            school_name_y: 35 * s,
            school_address_y: 58 * s,

            photo: Region::new(24 * s, 94 * s, 120 * su, 150 * su),

            student_name_pos: (right_column_x, 94 * s),
            detail_x: right_column_x,
            detail_label_w: 52 * su,
            detail_first_y: 126 * s,
            detail_line_h: 17 * su,

            qr: Region::new(right_column_x, (h - 114) * s, 88 * su, 88 * su),
            signature: Region::new((w - 196) * s, signature_y * s, signature_w * su, signature_h * su),
            notes_pos: (24 * s, (h - 18) * s),
            watermark: variant.has_watermark().then(|| {
                Region::new((w / 2 - 80) * s, (h / 2 - 80) * s, 160 * su, 160 * su)
            }),

            card_tag_size: 11.0 * f,
            school_name_size: 17.0 * f,
            school_address_size: 9.0 * f,
            student_name_size: 20.0 * f,
            detail_size: 11.0 * f,
            signature_size: 10.0 * f,
            notes_size: 8.0 * f,
        }
    }
}
