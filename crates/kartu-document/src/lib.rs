// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// kartu-document — The card-state-to-export pipeline for Kartu.
//
// Provides the bitmap card renderer and raster capture, the three export
// strategies (PDF via printpdf, DOCX via a hand-built OOXML package, print
// via a self-contained auto-printing page), file naming, and the pipeline
// orchestrator that keeps exports mutually exclusive.

pub mod docx;
pub mod filename;
pub mod payload;
pub mod pdf;
pub mod pipeline;
pub mod print_page;
pub mod render;

// Re-export the primary types so callers can use `kartu_document::ExportPipeline` etc.
pub use docx::{DocumentBuilder, OoxmlCardDocument};
pub use filename::export_file_name;
pub use pdf::{CardPdfBuilder, PdfBuilder};
pub use pipeline::{ExportArtifact, ExportPipeline};
pub use print_page::build_print_page;
pub use render::{CardRasterizer, Rasterizer};
