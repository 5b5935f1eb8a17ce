// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Editor page — the card form, the live preview, and the three export buttons.
//
// Text edits apply to the record synchronously; image edits read the picked
// file asynchronously and apply the encoded payload when done. Export
// triggers are disabled while any strategy is in flight.

use dioxus::prelude::*;

use kartu_core::card::{ImageField, TextField};
use kartu_core::error::{KartuError, Result};
use kartu_core::human_errors::humanize_error;
use kartu_document::ExportArtifact;

use crate::services::app_services::AppServices;
use crate::state::{AppState, ExportKind};

const MAIN_FIELDS: [TextField; 6] = [
    TextField::SchoolName,
    TextField::SchoolAddress,
    TextField::StudentName,
    TextField::StudentClass,
    TextField::Nisn,
    TextField::StudentAddress,
];

const OFFICIAL_FIELDS: [TextField; 3] = [
    TextField::PrincipalName,
    TextField::PrincipalNip,
    TextField::Notes,
];

const ISSUANCE_FIELDS: [TextField; 4] = [
    TextField::PlaceOfIssue,
    TextField::IssueDay,
    TextField::IssueMonth,
    TextField::IssueYear,
];

#[component]
pub fn Editor() -> Element {
    let state = use_context::<Signal<AppState>>();
    let variant = state.read().config.variant;

    rsx! {
        div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 32px; align-items: start;",

            // Form section
            div { style: "background: white; padding: 24px; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,0.1);",
                h2 { style: "font-size: 20px; font-weight: 600; color: #374151; margin: 0 0 24px 0;",
                    "Isi Data Kartu"
                }

                for field in MAIN_FIELDS {
                    TextInputRow { field }
                }

                div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 16px; margin: 16px 0;",
                    ImageUploader { field: ImageField::SchoolLogo }
                    ImageUploader { field: ImageField::StudentPhoto }
                }
                ImageUploader { field: ImageField::QrCode }
                if variant.has_watermark() {
                    ImageUploader { field: ImageField::Watermark }
                }

                hr { style: "margin: 16px 0; border: none; border-top: 1px solid #e5e7eb;" }

                for field in OFFICIAL_FIELDS {
                    TextInputRow { field }
                }

                if variant.has_issuance_block() {
                    hr { style: "margin: 16px 0; border: none; border-top: 1px solid #e5e7eb;" }
                    p { style: "font-size: 14px; color: #6b7280; margin: 0 0 12px 0;",
                        "Penetapan Kartu"
                    }
                    for field in ISSUANCE_FIELDS {
                        TextInputRow { field }
                    }
                }
            }

            // Preview section
            div { style: "display: flex; flex-direction: column; align-items: center;",
                h2 { style: "font-size: 20px; font-weight: 600; color: #374151; margin: 0 0 24px 0;",
                    "Pratinjau Kartu"
                }
                CardPreview {}
                ExportButtons {}
            }
        }
    }
}

// -- Input capture ------------------------------------------------------------

#[component]
fn TextInputRow(field: TextField) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let value = state.read().record.text(field).to_string();

    rsx! {
        div { style: "margin-bottom: 12px;",
            label { style: "display: block; font-size: 14px; font-weight: 500; color: #374151; margin-bottom: 4px;",
                "{field.label()}"
            }
            input {
                r#type: "text",
                style: "width: 100%; padding: 8px 12px; border: 1px solid #d1d5db; border-radius: 6px; font-size: 14px; box-sizing: border-box;",
                value: "{value}",
                placeholder: field.example(),
                oninput: move |evt| {
                    let next = state.read().record.with_text(field, evt.value());
                    state.write().record = next;
                },
            }
        }
    }
}

#[component]
fn ImageUploader(field: ImageField) -> Element {
    let state = use_context::<Signal<AppState>>();
    let preview = state
        .read()
        .record
        .image(field)
        .map(|payload| payload.as_data_uri());

    rsx! {
        div { style: "margin-bottom: 12px;",
            label { style: "display: block; font-size: 14px; font-weight: 500; color: #374151; margin-bottom: 4px;",
                "{field.label()}"
            }
            div { style: "display: flex; align-items: center; gap: 12px;",
                button {
                    style: "padding: 8px 16px; border: 1px dashed #4f46e5; border-radius: 6px; background: #eef2ff; color: #4f46e5; font-size: 14px; cursor: pointer;",
                    onclick: move |_| {
                        spawn(pick_image(state, field));
                    },
                    "Pilih Gambar"
                }
                if let Some(uri) = preview {
                    img {
                        src: "{uri}",
                        style: "height: 48px; width: 48px; object-fit: contain; border: 1px solid #e5e7eb; border-radius: 6px; background: white;",
                    }
                }
            }
        }
    }
}

/// Image edit: read the picked file fully, encode it as an inline payload,
/// then apply it to the record in one step. A cancelled dialog or an
/// unreadable file leaves the existing field value untouched.
async fn pick_image(mut state: Signal<AppState>, field: ImageField) {
    let picked = rfd::AsyncFileDialog::new()
        .add_filter("Gambar", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
        .pick_file()
        .await;

    let Some(file) = picked else {
        return;
    };

    let bytes = file.read().await;
    match kartu_document::payload::payload_from_bytes(&bytes) {
        Ok(payload) => {
            let next = state.read().record.with_image(field, payload);
            state.write().record = next;
        }
        Err(err) => {
            tracing::warn!(error = %err, ?field, "ignoring unreadable upload");
        }
    }
}

// -- Live preview -------------------------------------------------------------

/// Pure presentation of the current record: same geometry family as the
/// bitmap rasterizer, with placeholders for every unset field.
#[component]
fn CardPreview() -> Element {
    let state = use_context::<Signal<AppState>>();
    let record = state.read().record.clone();
    let variant = state.read().config.variant;
    let (width, height) = variant.design_size();

    let school_logo = record.image(ImageField::SchoolLogo).map(|p| p.as_data_uri());
    let student_photo = record.image(ImageField::StudentPhoto).map(|p| p.as_data_uri());
    let qr_code = record.image(ImageField::QrCode).map(|p| p.as_data_uri());
    let watermark = variant
        .has_watermark()
        .then(|| record.image(ImageField::Watermark).map(|p| p.as_data_uri()))
        .flatten();

    rsx! {
        div { style: "width: {width}px; height: {height}px; background: linear-gradient(135deg, #dbeafe, #ffffff, #cffafe); border-radius: 16px; box-shadow: 0 20px 25px rgba(0,0,0,0.15); padding: 12px; display: flex; flex-direction: column; overflow: hidden; position: relative; box-sizing: border-box;",

            if let Some(uri) = watermark {
                img {
                    src: "{uri}",
                    style: "position: absolute; left: 50%; top: 50%; transform: translate(-50%, -50%); width: 160px; height: 160px; object-fit: contain; opacity: 0.15; pointer-events: none;",
                }
            }

            // Header band
            div { style: "display: flex; align-items: center; padding: 9px; background: #1e40af; border-radius: 8px;",
                div { style: "background: white; border-radius: 6px; width: 48px; height: 48px; display: flex; align-items: center; justify-content: center; flex-shrink: 0;",
                    if let Some(uri) = school_logo {
                        img { src: "{uri}", style: "width: 44px; height: 44px; object-fit: contain;" }
                    }
                }
                div { style: "text-align: left; margin-left: 12px; overflow: hidden;",
                    p { style: "font-size: 11px; font-weight: 600; color: #bfdbfe; text-transform: uppercase; letter-spacing: 0.05em; margin: 0; white-space: nowrap;",
                        "Kartu Tanda Pelajar"
                    }
                    h1 { style: "font-size: 17px; font-weight: bold; color: white; line-height: 1.2; margin: 0; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;",
                        "{record.display_text(TextField::SchoolName)}"
                    }
                    p { style: "font-size: 9px; color: #bfdbfe; line-height: 1.2; margin: 0; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;",
                        "{record.display_text(TextField::SchoolAddress)}"
                    }
                }
            }

            // Body
            div { style: "flex: 1; display: flex; gap: 16px; padding-top: 14px; overflow: hidden;",
                // Photo column
                div { style: "width: 120px; height: 150px; background: #e5e7eb; border: 3px solid #bfdbfe; border-radius: 8px; overflow: hidden; flex-shrink: 0; margin-left: 12px;",
                    if let Some(uri) = student_photo {
                        img { src: "{uri}", style: "width: 100%; height: 100%; object-fit: cover;" }
                    }
                }

                // Details, QR, signature
                div { style: "flex: 1; display: flex; flex-direction: column; text-align: left; overflow: hidden; padding-right: 8px;",
                    h2 { style: "font-size: 20px; font-weight: bold; color: #1e3a8a; line-height: 1.2; margin: 0; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;",
                        "{record.display_text(TextField::StudentName)}"
                    }
                    div { style: "margin-top: 8px; font-size: 11px; color: #374151;",
                        DetailRow { label: "NISN", value: record.display_text(TextField::Nisn).to_string() }
                        DetailRow { label: "Kelas", value: record.display_text(TextField::StudentClass).to_string() }
                        DetailRow { label: "Alamat", value: record.display_text(TextField::StudentAddress).to_string() }
                    }

                    // QR and signature, pushed to the bottom
                    div { style: "flex: 1; display: flex; align-items: flex-end; justify-content: space-between; gap: 16px;",
                        div { style: "width: 88px; height: 88px; flex-shrink: 0; background: white; border-radius: 6px; padding: 2px; box-sizing: border-box;",
                            if let Some(uri) = qr_code {
                                img { src: "{uri}", style: "width: 100%; height: 100%; object-fit: contain;" }
                            }
                        }
                        div { style: "text-align: center; font-size: 10px; color: #374151; width: 180px;",
                            if variant.has_issuance_block() {
                                p { style: "margin: 0;",
                                    {format!(
                                        "{}, {} {} {}",
                                        record.display_text(TextField::PlaceOfIssue),
                                        record.display_text(TextField::IssueDay),
                                        record.display_text(TextField::IssueMonth),
                                        record.display_text(TextField::IssueYear),
                                    )}
                                }
                            }
                            p { style: "margin: 0;", "Mengetahui," }
                            p { style: "margin: 0;", "Kepala Sekolah" }
                            div { style: "height: 26px;" }
                            p { style: "font-weight: bold; border-bottom: 1px solid #374151; margin: 0; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;",
                                "{record.display_text(TextField::PrincipalName)}"
                            }
                            p { style: "margin: 0;", "NIP. {record.display_text(TextField::PrincipalNip)}" }
                        }
                    }

                    // Notes line at the bottom of the card
                    p { style: "font-size: 8px; color: #6b7280; font-style: italic; margin: 4px 0 0 0; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;",
                        strong { "Catatan: " }
                        "{record.display_text(TextField::Notes)}"
                    }
                }
            }
        }
    }
}

#[component]
fn DetailRow(label: &'static str, value: String) -> Element {
    rsx! {
        p { style: "margin: 0 0 4px 0; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;",
            span { style: "font-weight: 600; color: #6b7280; display: inline-block; width: 52px;",
                "{label}"
            }
            ": {value}"
        }
    }
}

// -- Export strategies --------------------------------------------------------

#[component]
fn ExportButtons() -> Element {
    let state = use_context::<Signal<AppState>>();
    let exporting = state.read().exporting;
    let status = state.read().status_message.clone();

    rsx! {
        div { style: "margin-top: 32px; width: 100%; max-width: 320px; display: flex; flex-direction: column; gap: 12px;",
            ExportButton {
                kind: ExportKind::Pdf,
                label: "Unduh Kartu (PDF)",
                background: "#4f46e5",
                exporting,
            }
            ExportButton {
                kind: ExportKind::Document,
                label: "Unduh Kartu (Word)",
                background: "#2563eb",
                exporting,
            }
            ExportButton {
                kind: ExportKind::Print,
                label: "Cetak Kartu",
                background: "#374151",
                exporting,
            }
            if let Some(ref msg) = status {
                p { style: "color: #15803d; font-size: 14px; text-align: center; margin: 4px 0 0 0;",
                    "{msg}"
                }
            }
        }
    }
}

#[component]
fn ExportButton(
    kind: ExportKind,
    label: &'static str,
    background: &'static str,
    exporting: Option<ExportKind>,
) -> Element {
    let state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let busy = exporting.is_some();
    let opacity = if busy { "0.5" } else { "1" };
    let text = if exporting == Some(kind) {
        kind.progress_label()
    } else {
        label
    };

    rsx! {
        button {
            style: "padding: 12px 24px; border: none; border-radius: 8px; background: {background}; color: white; font-size: 16px; font-weight: 500; cursor: pointer; opacity: {opacity};",
            disabled: busy,
            onclick: move |_| {
                trigger_export(state, svc.clone(), kind);
            },
            "{text}"
        }
    }
}

/// Run one export strategy end to end: snapshot the record, capture and
/// package off the UI loop, deliver the artifact, and report the outcome.
/// A trigger while any strategy is in flight is a no-op.
fn trigger_export(mut state: Signal<AppState>, svc: AppServices, kind: ExportKind) {
    if state.read().exporting.is_some() {
        return;
    }
    {
        let mut st = state.write();
        st.exporting = Some(kind);
        st.status_message = None;
    }

    spawn(async move {
        let (record, variant) = {
            let st = state.read();
            (st.record.clone(), st.config.variant)
        };

        let outcome = match kind {
            ExportKind::Pdf => {
                let result = svc.export_pdf(record, variant).await;
                deliver_artifact(&svc, result).await
            }
            ExportKind::Document => {
                let result = svc.export_document(record, variant).await;
                deliver_artifact(&svc, result).await
            }
            ExportKind::Print => svc
                .print_card(record, variant)
                .await
                .map(|()| Some("Dialog cetak telah dibuka.".to_string())),
        };

        match outcome {
            Ok(Some(message)) => state.write().status_message = Some(message),
            // User cancelled the save dialog — nothing to report.
            Ok(None) => {}
            // Lost a race against another trigger; the other export reports.
            Err(KartuError::ExportBusy) => {}
            Err(err) => {
                tracing::error!(error = %err, ?kind, "export failed");
                alert_error(&err).await;
            }
        }

        state.write().exporting = None;
    });
}

async fn deliver_artifact(
    svc: &AppServices,
    result: Result<ExportArtifact>,
) -> Result<Option<String>> {
    let artifact = result?;
    match svc.deliver(artifact).await? {
        Some(path) => Ok(Some(format!("Tersimpan: {}", path.display()))),
        None => Ok(None),
    }
}

/// Blocking, user-visible alert in the card's language.
async fn alert_error(err: &KartuError) {
    let human = humanize_error(err);
    rfd::AsyncMessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title(human.message.as_str())
        .set_description(human.suggestion.as_str())
        .show()
        .await;
}
