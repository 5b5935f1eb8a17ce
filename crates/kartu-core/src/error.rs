// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Kartu.

use thiserror::Error;

/// Top-level error type for all Kartu operations.
#[derive(Debug, Error)]
pub enum KartuError {
    // -- Card data --
    #[error("image payload error: {0}")]
    ImagePayload(String),

    // -- Rendering / capture --
    #[error("raster capture failed: {0}")]
    Raster(String),

    #[error("no usable font found on this system")]
    FontUnavailable,

    // -- Export strategies --
    #[error("PDF assembly failed: {0}")]
    Pdf(String),

    #[error("document assembly failed: {0}")]
    Document(String),

    #[error("print context could not be opened: {0}")]
    Print(String),

    /// Another export is already in flight; the trigger is a no-op.
    #[error("an export is already in progress")]
    ExportBusy,

    // -- Storage / platform --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, KartuError>;
