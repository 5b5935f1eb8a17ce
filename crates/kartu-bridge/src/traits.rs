// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.

use kartu_core::error::Result;

/// Unified bridge that groups all native capabilities.
pub trait PlatformBridge: NativePrint {
    /// Human-readable platform name (e.g. "Linux desktop").
    fn platform_name(&self) -> &str;
}

/// Open print contexts on the host platform.
pub trait NativePrint: Send + Sync {
    /// Open a new browsing context showing the given self-contained page.
    ///
    /// The page is expected to invoke the platform print dialog itself on
    /// load. Returns Ok(()) once the context was handed to the platform
    /// (the user may still cancel the dialog); an error means the context
    /// could not be opened at all.
    fn open_print_context(&self, page_html: &str) -> Result<()>;
}
