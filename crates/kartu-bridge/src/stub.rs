// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for platforms without a way to open a print context.

use kartu_core::error::{KartuError, Result};

use crate::traits::{NativePrint, PlatformBridge};

/// No-op bridge returned on unsupported platforms.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Unsupported platform (stub)"
    }
}

impl NativePrint for StubBridge {
    fn open_print_context(&self, _page_html: &str) -> Result<()> {
        tracing::warn!("NativePrint::open_print_context called on stub bridge");
        Err(KartuError::PlatformUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_reports_platform_unavailable() {
        let err = StubBridge.open_print_context("<html></html>").unwrap_err();
        assert!(matches!(err, KartuError::PlatformUnavailable));
    }
}
