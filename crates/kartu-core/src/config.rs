// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

use crate::card::CardVariant;

/// Persistent application settings.
///
/// Card data itself is never persisted — only these presentation settings
/// survive a restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Which card layout to render and export.
    pub variant: CardVariant,
    /// Oversampling factor applied at raster capture (applied on launch).
    pub raster_scale: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            variant: CardVariant::Classic,
            raster_scale: 3,
        }
    }
}
