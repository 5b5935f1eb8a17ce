// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// System font discovery for the bitmap card renderer.
//
// Nothing is bundled with the binary; the renderer picks the first sans-serif
// family found at a well-known path. Capture fails with `FontUnavailable`
// when none exists, which the UI surfaces as a permanent error.

use std::path::Path;

use ab_glyph::FontVec;
use kartu_core::error::{KartuError, Result};
use tracing::{debug, warn};

/// Well-known (regular, bold) font file pairs, tried in order.
const CANDIDATES: &[(&str, &str)] = &[
    // Linux
    (
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
        "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    ),
    // macOS
    (
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    ),
    ("/Library/Fonts/Arial.ttf", "/Library/Fonts/Arial Bold.ttf"),
    // Windows
    ("C:\\Windows\\Fonts\\arial.ttf", "C:\\Windows\\Fonts\\arialbd.ttf"),
];

/// The regular/bold pair used for all card text.
pub struct FontStore {
    regular: FontVec,
    bold: Option<FontVec>,
}

impl FontStore {
    /// Probe the candidate paths and load the first usable family.
    pub fn discover() -> Result<Self> {
        for (regular, bold) in CANDIDATES {
            if Path::new(regular).exists() {
                debug!(path = regular, "loading card font");
                return Self::load(Path::new(regular), Some(Path::new(bold)));
            }
        }
        warn!("no usable sans-serif font found at any well-known path");
        Err(KartuError::FontUnavailable)
    }

    /// Load a specific font file, with an optional bold companion.
    ///
    /// A missing or unparsable bold file falls back to the regular face; a
    /// missing regular face is an error.
    pub fn load(regular: &Path, bold: Option<&Path>) -> Result<Self> {
        let regular_bytes = std::fs::read(regular)?;
        let regular =
            FontVec::try_from_vec(regular_bytes).map_err(|_| KartuError::FontUnavailable)?;

        let bold = bold
            .filter(|path| path.exists())
            .and_then(|path| std::fs::read(path).ok())
            .and_then(|bytes| FontVec::try_from_vec(bytes).ok());

        Ok(Self { regular, bold })
    }

    pub fn regular(&self) -> &FontVec {
        &self.regular
    }

    /// The bold face, or the regular face when no bold file was found.
    pub fn bold(&self) -> &FontVec {
        self.bold.as_ref().unwrap_or(&self.regular)
    }
}
