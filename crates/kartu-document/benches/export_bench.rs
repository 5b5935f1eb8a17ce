// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the export assembly paths in kartu-document.
// The capture itself depends on system fonts, so the benches feed the
// builders a synthetic capture instead — assembly is the hot path anyway.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{Rgba, RgbaImage};

use kartu_document::docx::DocumentBuilder;
use kartu_document::pdf::PdfBuilder;
use kartu_document::{CardPdfBuilder, OoxmlCardDocument};

/// A 3x classic capture (1536x969) with a simple two-band fill, PNG-encoded.
fn synthetic_capture() -> Vec<u8> {
    let (w, h) = (512 * 3u32, 323 * 3u32);
    let img = RgbaImage::from_fn(w, h, |_, y| {
        if y < h / 4 {
            Rgba([30, 64, 175, 255])
        } else {
            Rgba([235, 244, 254, 255])
        }
    });
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn bench_pdf_assembly(c: &mut Criterion) {
    let capture = synthetic_capture();
    let builder = CardPdfBuilder::new();

    c.bench_function("pdf_assembly (3x capture)", |b| {
        b.iter(|| {
            let pdf = builder.build(black_box(&capture)).unwrap();
            black_box(pdf);
        });
    });
}

fn bench_docx_assembly(c: &mut Criterion) {
    let capture = synthetic_capture();

    c.bench_function("docx_assembly (3x capture)", |b| {
        b.iter(|| {
            let docx = OoxmlCardDocument
                .build(black_box(&capture), 512, 323)
                .unwrap();
            black_box(docx);
        });
    });
}

criterion_group!(benches, bench_pdf_assembly, bench_docx_assembly);
criterion_main!(benches);
