// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// kartu-bridge — Native platform bridges for Kartu.
//
// The export pipeline produces platform-neutral artifacts; this crate owns
// the last step of the print strategy, opening a browsing context on
// whatever platform the app runs on.

pub mod desktop;
pub mod stub;
pub mod traits;

pub use traits::{NativePrint, PlatformBridge};

use std::sync::Arc;

/// The bridge for the current platform.
#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
pub fn native_bridge() -> Arc<dyn PlatformBridge> {
    Arc::new(desktop::DesktopBridge::new())
}

/// The bridge for the current platform.
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
pub fn native_bridge() -> Arc<dyn PlatformBridge> {
    Arc::new(stub::StubBridge)
}
