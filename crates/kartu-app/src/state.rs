// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state — reactive signal for the Dioxus UI.

use kartu_core::AppConfig;
use kartu_core::card::CardRecord;

use crate::services::app_services::AppServices;

/// Which export strategy the UI is currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Pdf,
    Document,
    Print,
}

impl ExportKind {
    /// Button label while the strategy is in flight.
    pub fn progress_label(&self) -> &'static str {
        match self {
            Self::Pdf => "Memproses PDF...",
            Self::Document => "Memproses Word...",
            Self::Print => "Menyiapkan Cetakan...",
        }
    }
}

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The one card record driving the preview and every export.
    pub record: CardRecord,
    /// Application settings.
    pub config: AppConfig,
    /// Export currently in flight; all three triggers are disabled while set.
    pub exporting: Option<ExportKind>,
    /// Status message for user feedback.
    pub status_message: Option<String>,
}

impl AppState {
    /// Create initial state from the backend services.
    pub fn new(svc: &AppServices) -> Self {
        Self {
            record: CardRecord::new(),
            config: svc.config(),
            exporting: None,
            status_message: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            record: CardRecord::new(),
            config: AppConfig::default(),
            exporting: None,
            status_message: None,
        }
    }
}
