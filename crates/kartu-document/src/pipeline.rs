// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export pipeline — the three card export strategies behind one busy flag.
//
// Every strategy takes a fresh capture of the current record (captures are
// never shared or cached), packages it, and returns a named artifact. The
// busy flag makes strategies mutually exclusive with each other and with
// themselves: a trigger while one is in flight is a no-op (`ExportBusy`).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use kartu_core::card::{CardRecord, CardVariant, ImageMime, ImagePayload};
use kartu_core::error::{KartuError, Result};
use tracing::{info, instrument};

use crate::docx::{DocumentBuilder, OoxmlCardDocument};
use crate::filename::export_file_name;
use crate::pdf::{CardPdfBuilder, PdfBuilder};
use crate::print_page::build_print_page;
use crate::render::rasterizer::{CardRasterizer, Rasterizer};
use crate::render::encode_png;

/// A finished export, ready to hand to the platform for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: &'static str,
}

/// Orchestrates capture and packaging for the three export strategies.
pub struct ExportPipeline {
    rasterizer: Arc<dyn Rasterizer>,
    pdf: Arc<dyn PdfBuilder>,
    document: Arc<dyn DocumentBuilder>,
    busy: AtomicBool,
}

impl ExportPipeline {
    pub fn new(
        rasterizer: Arc<dyn Rasterizer>,
        pdf: Arc<dyn PdfBuilder>,
        document: Arc<dyn DocumentBuilder>,
    ) -> Self {
        Self {
            rasterizer,
            pdf,
            document,
            busy: AtomicBool::new(false),
        }
    }

    /// Production wiring: system-font rasterizer at the given capture scale,
    /// printpdf and OOXML builders.
    pub fn with_defaults(raster_scale: u32) -> Self {
        Self::new(
            Arc::new(CardRasterizer::new(raster_scale)),
            Arc::new(CardPdfBuilder::new()),
            Arc::new(OoxmlCardDocument),
        )
    }

    /// Whether an export is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Claim the busy flag, or report `ExportBusy` without touching anything.
    fn begin(&self) -> Result<BusyGuard<'_>> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Ok(BusyGuard { flag: &self.busy })
        } else {
            Err(KartuError::ExportBusy)
        }
    }

    /// PDF strategy: capture, then wrap into a single landscape page at the
    /// physical card size.
    #[instrument(skip(self, record))]
    pub fn export_pdf(&self, record: &CardRecord, variant: CardVariant) -> Result<ExportArtifact> {
        let _guard = self.begin()?;
        info!("PDF export started");

        let capture = self.rasterizer.capture(record, variant)?;
        let png = encode_png(&capture)?;
        let bytes = self.pdf.build(&png)?;

        Ok(ExportArtifact {
            file_name: export_file_name(&record.student_name, "pdf"),
            bytes,
            mime: "application/pdf",
        })
    }

    /// Document strategy: capture, then embed at the variant design size in
    /// a single-paragraph DOCX.
    #[instrument(skip(self, record))]
    pub fn export_document(
        &self,
        record: &CardRecord,
        variant: CardVariant,
    ) -> Result<ExportArtifact> {
        let _guard = self.begin()?;
        info!("DOCX export started");

        let capture = self.rasterizer.capture(record, variant)?;
        let png = encode_png(&capture)?;
        let (width_px, height_px) = variant.design_size();
        let bytes = self.document.build(&png, width_px, height_px)?;

        Ok(ExportArtifact {
            file_name: export_file_name(&record.student_name, "docx"),
            bytes,
            mime: "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        })
    }

    /// Print strategy, capture half: produce the self-contained print page.
    /// The caller hands the page to the platform bridge for opening.
    #[instrument(skip(self, record))]
    pub fn capture_print_page(&self, record: &CardRecord, variant: CardVariant) -> Result<String> {
        let _guard = self.begin()?;
        info!("print capture started");

        let capture = self.rasterizer.capture(record, variant)?;
        let png = encode_png(&capture)?;
        let payload = ImagePayload::from_encoded(ImageMime::Png, &png);
        Ok(build_print_page(&payload.as_data_uri()))
    }
}

/// Clears the busy flag when an export completes or fails.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::sync::atomic::AtomicUsize;

    use image::{Rgba, RgbaImage};
    use kartu_core::card::TextField;

    /// Counts captures and returns a solid bitmap at the variant design size.
    struct CountingRasterizer {
        captures: AtomicUsize,
    }

    impl CountingRasterizer {
        fn new() -> Self {
            Self {
                captures: AtomicUsize::new(0),
            }
        }
    }

    impl Rasterizer for CountingRasterizer {
        fn capture(&self, _record: &CardRecord, variant: CardVariant) -> Result<RgbaImage> {
            self.captures.fetch_add(1, Ordering::SeqCst);
            let (w, h) = variant.design_size();
            Ok(RgbaImage::from_pixel(w, h, Rgba([1, 2, 3, 255])))
        }
    }

    /// Blocks inside capture until the test releases it.
    struct GatedRasterizer {
        entered: Arc<Barrier>,
        release: Arc<Barrier>,
        inner: CountingRasterizer,
    }

    impl Rasterizer for GatedRasterizer {
        fn capture(&self, record: &CardRecord, variant: CardVariant) -> Result<RgbaImage> {
            self.entered.wait();
            self.release.wait();
            self.inner.capture(record, variant)
        }
    }

    struct FailingRasterizer;

    impl Rasterizer for FailingRasterizer {
        fn capture(&self, _record: &CardRecord, _variant: CardVariant) -> Result<RgbaImage> {
            Err(KartuError::Raster("surface not available".into()))
        }
    }

    fn pipeline_with(rasterizer: Arc<dyn Rasterizer>) -> ExportPipeline {
        ExportPipeline::new(
            rasterizer,
            Arc::new(CardPdfBuilder::new()),
            Arc::new(OoxmlCardDocument),
        )
    }

    #[test]
    fn pdf_artifact_is_named_after_the_student() {
        let pipeline = pipeline_with(Arc::new(CountingRasterizer::new()));
        let record = CardRecord::new().with_text(TextField::StudentName, "Budi Santoso");

        let artifact = pipeline.export_pdf(&record, CardVariant::Classic).unwrap();
        assert_eq!(artifact.file_name, "kartu-pelajar-Budi_Santoso.pdf");
        assert_eq!(artifact.mime, "application/pdf");
        assert!(artifact.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn document_artifact_uses_the_same_naming_rule() {
        let pipeline = pipeline_with(Arc::new(CountingRasterizer::new()));

        let unnamed = pipeline
            .export_document(&CardRecord::new(), CardVariant::Classic)
            .unwrap();
        assert_eq!(unnamed.file_name, "kartu-pelajar.docx");

        let named = pipeline
            .export_document(
                &CardRecord::new().with_text(TextField::StudentName, "Ani"),
                CardVariant::Classic,
            )
            .unwrap();
        assert_eq!(named.file_name, "kartu-pelajar-Ani.docx");
        // DOCX packages are ZIP archives.
        assert_eq!(&named.bytes[..2], b"PK");
    }

    #[test]
    fn every_export_takes_a_fresh_capture() {
        let rasterizer = Arc::new(CountingRasterizer::new());
        let pipeline = pipeline_with(rasterizer.clone());
        let record = CardRecord::new();

        pipeline.export_pdf(&record, CardVariant::Classic).unwrap();
        pipeline.export_pdf(&record, CardVariant::Classic).unwrap();
        pipeline
            .export_document(&record, CardVariant::Classic)
            .unwrap();
        pipeline
            .capture_print_page(&record, CardVariant::Classic)
            .unwrap();

        assert_eq!(rasterizer.captures.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn exports_are_mutually_exclusive_while_in_flight() {
        let entered = Arc::new(Barrier::new(2));
        let release = Arc::new(Barrier::new(2));
        let rasterizer = Arc::new(GatedRasterizer {
            entered: entered.clone(),
            release: release.clone(),
            inner: CountingRasterizer::new(),
        });
        let pipeline = Arc::new(pipeline_with(rasterizer.clone()));

        let worker = {
            let pipeline = pipeline.clone();
            std::thread::spawn(move || pipeline.export_pdf(&CardRecord::new(), CardVariant::Classic))
        };

        // Wait until the first export is inside its capture.
        entered.wait();
        assert!(pipeline.is_busy());

        // Any trigger while busy is a no-op: no second capture happens.
        let record = CardRecord::new();
        assert!(matches!(
            pipeline.export_pdf(&record, CardVariant::Classic),
            Err(KartuError::ExportBusy)
        ));
        assert!(matches!(
            pipeline.export_document(&record, CardVariant::Classic),
            Err(KartuError::ExportBusy)
        ));
        assert!(matches!(
            pipeline.capture_print_page(&record, CardVariant::Classic),
            Err(KartuError::ExportBusy)
        ));

        release.wait();
        let artifact = worker.join().unwrap().unwrap();
        assert_eq!(artifact.file_name, "kartu-pelajar.pdf");
        assert_eq!(rasterizer.inner.captures.load(Ordering::SeqCst), 1);
        assert!(!pipeline.is_busy());
    }

    #[test]
    fn a_failed_export_clears_the_busy_flag_and_yields_no_artifact() {
        let pipeline = pipeline_with(Arc::new(FailingRasterizer));
        let record = CardRecord::new();

        let err = pipeline.export_pdf(&record, CardVariant::Classic).unwrap_err();
        assert!(matches!(err, KartuError::Raster(_)));
        assert!(!pipeline.is_busy());

        // The pipeline is usable again immediately (no stuck flag).
        let err = pipeline
            .export_document(&record, CardVariant::Classic)
            .unwrap_err();
        assert!(matches!(err, KartuError::Raster(_)));
        assert!(!pipeline.is_busy());
    }

    #[test]
    fn print_page_embeds_a_fresh_capture() {
        let pipeline = pipeline_with(Arc::new(CountingRasterizer::new()));
        let page = pipeline
            .capture_print_page(&CardRecord::new(), CardVariant::Classic)
            .unwrap();
        assert!(page.contains("data:image/png;base64,"));
        assert!(page.contains("window.print()"));
    }

    #[test]
    fn end_to_end_pdf_export_with_the_real_rasterizer() {
        // Skipped on machines without a discoverable font.
        if crate::render::FontStore::discover().is_err() {
            return;
        }

        let pipeline = ExportPipeline::with_defaults(3);
        let record = CardRecord::new()
            .with_text(TextField::StudentName, "Ani")
            .with_text(TextField::StudentClass, "X-1");

        let artifact = pipeline.export_pdf(&record, CardVariant::Classic).unwrap();
        assert_eq!(artifact.file_name, "kartu-pelajar-Ani.pdf");
        assert!(artifact.bytes.starts_with(b"%PDF"));
        // A 3x capture of a fully drawn card compresses to well over a few KB.
        assert!(artifact.bytes.len() > 10_000);
        assert!(!pipeline.is_busy());
    }

    #[test]
    fn artifacts_can_be_written_to_disk() {
        let pipeline = pipeline_with(Arc::new(CountingRasterizer::new()));
        let artifact = pipeline
            .export_pdf(&CardRecord::new(), CardVariant::Classic)
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(&artifact.file_name);
        std::fs::write(&path, &artifact.bytes).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), artifact.bytes);
    }
}
