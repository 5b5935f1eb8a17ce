// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Card rendering — shared geometry, font discovery, and the bitmap rasterizer.

pub mod font;
pub mod layout;
pub mod rasterizer;

pub use font::FontStore;
pub use layout::CardLayout;
pub use rasterizer::{CardRasterizer, Rasterizer};

use image::RgbaImage;
use kartu_core::error::{KartuError, Result};

/// Encode a captured bitmap as PNG bytes.
pub fn encode_png(bitmap: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    bitmap
        .write_to(&mut cursor, image::ImageFormat::Png)
        .map_err(|err| KartuError::Raster(format!("PNG encoding failed: {err}")))?;
    Ok(buffer)
}
