// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop bridge — delivers print pages through the platform's default
// handler for local HTML files.
//
// The page is spooled to a temporary file and handed to the OS opener; the
// page itself invokes the print dialog and closes its context, so nothing
// here waits on the dialog.

use std::path::PathBuf;
use std::process::Command;

use chrono::Utc;
use kartu_core::error::{KartuError, Result};
use tracing::{debug, info};

use crate::traits::{NativePrint, PlatformBridge};

/// Bridge used on Linux, macOS, and Windows desktops.
pub struct DesktopBridge;

impl DesktopBridge {
    pub fn new() -> Self {
        Self
    }

    /// Write the page to a uniquely named spool file and return its path.
    fn spool_page(&self, page_html: &str) -> Result<PathBuf> {
        let name = format!(
            "kartu-print-{}-{}.html",
            std::process::id(),
            Utc::now().timestamp_millis()
        );
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, page_html)?;
        debug!(path = %path.display(), "print page spooled");
        Ok(path)
    }
}

impl Default for DesktopBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for DesktopBridge {
    fn platform_name(&self) -> &str {
        if cfg!(target_os = "macos") {
            "macOS desktop"
        } else if cfg!(target_os = "windows") {
            "Windows desktop"
        } else {
            "Linux desktop"
        }
    }
}

impl NativePrint for DesktopBridge {
    fn open_print_context(&self, page_html: &str) -> Result<()> {
        let path = self.spool_page(page_html)?;

        let spawned = if cfg!(target_os = "macos") {
            Command::new("open").arg(&path).spawn()
        } else if cfg!(target_os = "windows") {
            Command::new("cmd").args(["/C", "start", ""]).arg(&path).spawn()
        } else {
            Command::new("xdg-open").arg(&path).spawn()
        };

        match spawned {
            Ok(_) => {
                info!(path = %path.display(), "print context opened");
                Ok(())
            }
            Err(err) => Err(KartuError::Print(format!(
                "could not open {}: {err}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spooled_page_is_written_verbatim() {
        let bridge = DesktopBridge::new();
        let html = "<!DOCTYPE html><html><body>uji coba</body></html>";
        let path = bridge.spool_page(html).unwrap();

        assert_eq!(path.extension().unwrap(), "html");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), html);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn spool_names_are_unique_per_call() {
        let bridge = DesktopBridge::new();
        let a = bridge.spool_page("a").unwrap();
        // Timestamps are millisecond-resolution; force a tick.
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = bridge.spool_page("b").unwrap();
        assert_ne!(a, b);
        std::fs::remove_file(a).ok();
        std::fs::remove_file(b).ok();
    }
}
