// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// DOCX assembly — wrap a captured card bitmap into a minimal OOXML package:
// one paragraph holding one inline image at the card's design pixel size.
//
// A DOCX file is a ZIP archive of XML parts plus media. The package here is
// built from scratch (no template): content types, package relationships,
// document properties, the document part with a single `wp:inline` drawing,
// and the PNG under word/media/.

use std::io::{Cursor, Write};

use chrono::Utc;
use kartu_core::error::{KartuError, Result};
use tracing::{debug, info, instrument};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// English Metric Units per pixel at 96 dpi — the OOXML drawing unit.
pub const EMU_PER_PIXEL: u32 = 9525;

/// Wrap a captured bitmap into a finished word-processor document.
///
/// `width_px`/`height_px` give the display size of the embedded image — the
/// card's design pixel size, independent of the capture's oversampling.
pub trait DocumentBuilder: Send + Sync {
    fn build(&self, png_bytes: &[u8], width_px: u32, height_px: u32) -> Result<Vec<u8>>;
}

/// Single-paragraph OOXML document with one inline card image.
pub struct OoxmlCardDocument;

impl DocumentBuilder for OoxmlCardDocument {
    #[instrument(skip(self, png_bytes), fields(bytes_len = png_bytes.len()))]
    fn build(&self, png_bytes: &[u8], width_px: u32, height_px: u32) -> Result<Vec<u8>> {
        if png_bytes.is_empty() {
            return Err(KartuError::Document("empty capture".into()));
        }

        let cx = width_px as u64 * EMU_PER_PIXEL as u64;
        let cy = height_px as u64 * EMU_PER_PIXEL as u64;
        info!(cx, cy, "assembling card DOCX");

        let now = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

        // Part order follows packaging convention: content types first.
        let parts: [(&str, Vec<u8>); 7] = [
            ("[Content_Types].xml", content_types_xml().into_bytes()),
            ("_rels/.rels", package_rels_xml().into_bytes()),
            ("docProps/core.xml", core_props_xml(&now).into_bytes()),
            ("docProps/app.xml", app_props_xml().into_bytes()),
            ("word/document.xml", document_xml(cx, cy).into_bytes()),
            (
                "word/_rels/document.xml.rels",
                document_rels_xml().into_bytes(),
            ),
            ("word/media/image1.png", png_bytes.to_vec()),
        ];

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (path, contents) in parts {
            zip.start_file(path, options)
                .map_err(|err| KartuError::Document(format!("zip entry {path}: {err}")))?;
            zip.write_all(&contents)
                .map_err(|err| KartuError::Document(format!("zip write {path}: {err}")))?;
        }

        let cursor = zip
            .finish()
            .map_err(|err| KartuError::Document(format!("zip finalise: {err}")))?;

        debug!("DOCX package complete");
        Ok(cursor.into_inner())
    }
}

// -- XML parts ----------------------------------------------------------------

fn content_types_xml() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
        r#"<Default Extension="xml" ContentType="application/xml"/>"#,
        r#"<Default Extension="png" ContentType="image/png"/>"#,
        r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
        r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
        r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#,
        r#"</Types>"#,
    )
    .to_string()
}

fn package_rels_xml() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
        r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
        r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>"#,
        r#"</Relationships>"#,
    )
    .to_string()
}

fn core_props_xml(timestamp: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<cp:coreProperties "#,
            r#"xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" "#,
            r#"xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            r#"<dc:title>Kartu Pelajar</dc:title>"#,
            r#"<dc:creator>Kartu</dc:creator>"#,
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{ts}</dcterms:created>"#,
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{ts}</dcterms:modified>"#,
            r#"</cp:coreProperties>"#,
        ),
        ts = timestamp
    )
}

fn app_props_xml() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">"#,
        r#"<Application>Kartu</Application>"#,
        r#"</Properties>"#,
    )
    .to_string()
}

/// The document part: one paragraph, one run, one inline drawing referencing
/// the image relationship, followed by an A4 section so word processors do
/// not have to guess the page setup.
fn document_xml(cx: u64, cy: u64) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<w:document "#,
            r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
            r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
            r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
            r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            "\n<w:body>\n",
            "<w:p><w:r><w:drawing>",
            r#"<wp:inline distT="0" distB="0" distL="0" distR="0">"#,
            r#"<wp:extent cx="{cx}" cy="{cy}"/>"#,
            r#"<wp:effectExtent l="0" t="0" r="0" b="0"/>"#,
            r#"<wp:docPr id="1" name="Kartu Pelajar"/>"#,
            r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
            r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            r#"<pic:pic>"#,
            r#"<pic:nvPicPr><pic:cNvPr id="1" name="image1.png"/><pic:cNvPicPr/></pic:nvPicPr>"#,
            r#"<pic:blipFill><a:blip r:embed="rId1"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
            r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
            r#"</pic:pic></a:graphicData></a:graphic>"#,
            r#"</wp:inline>"#,
            "</w:drawing></w:r></w:p>\n",
            r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/>"#,
            r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/>"#,
            r#"</w:sectPr>"#,
            "\n</w:body>\n</w:document>",
        ),
        cx = cx,
        cy = cy
    )
}

fn document_rels_xml() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>"#,
        r#"</Relationships>"#,
    )
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn capture_png() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(16, 10, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn read_part(bytes: &[u8], name: &str) -> Vec<u8> {
        let mut archive = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut contents = Vec::new();
        part.read_to_end(&mut contents).unwrap();
        contents
    }

    #[test]
    fn package_contains_all_required_parts() {
        let png = capture_png();
        let docx = OoxmlCardDocument.build(&png, 512, 323).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(docx)).unwrap();
        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "docProps/app.xml",
            "word/document.xml",
            "word/_rels/document.xml.rels",
            "word/media/image1.png",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing part {name}");
        }
    }

    #[test]
    fn embedded_image_bytes_are_bit_identical() {
        let png = capture_png();
        let docx = OoxmlCardDocument.build(&png, 512, 323).unwrap();
        assert_eq!(read_part(&docx, "word/media/image1.png"), png);
    }

    #[test]
    fn document_sizes_image_in_emu() {
        let docx = OoxmlCardDocument.build(&capture_png(), 512, 323).unwrap();
        let doc_xml = String::from_utf8(read_part(&docx, "word/document.xml")).unwrap();

        let cx = 512u64 * EMU_PER_PIXEL as u64;
        let cy = 323u64 * EMU_PER_PIXEL as u64;
        assert!(doc_xml.contains(&format!(r#"<wp:extent cx="{cx}" cy="{cy}"/>"#)));
        assert!(doc_xml.contains(r#"r:embed="rId1""#));
    }

    #[test]
    fn relationship_targets_the_media_part() {
        let docx = OoxmlCardDocument.build(&capture_png(), 540, 340).unwrap();
        let rels = String::from_utf8(read_part(&docx, "word/_rels/document.xml.rels")).unwrap();
        assert!(rels.contains(r#"Target="media/image1.png""#));
    }

    #[test]
    fn empty_capture_is_rejected() {
        let err = OoxmlCardDocument.build(&[], 512, 323).unwrap_err();
        assert!(matches!(err, KartuError::Document(_)));
    }
}
