// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings page — persistent app configuration.

use dioxus::prelude::*;

use kartu_core::card::CardVariant;

use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn Settings() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut save_msg = use_signal(|| Option::<String>::None);

    rsx! {
        div { style: "max-width: 560px; background: white; padding: 24px; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,0.1);",
            h1 { style: "font-size: 22px; margin: 0 0 16px 0;", "Pengaturan" }

            section { style: "margin: 16px 0;",
                h3 { "Kartu" }
                // Card variant
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "Varian kartu" }
                    select {
                        style: "padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                        value: variant_label(&state.read().config.variant),
                        onchange: move |evt| {
                            if let Some(variant) = variant_from_label(&evt.value()) {
                                state.write().config.variant = variant;
                            }
                        },
                        option { value: "Classic", {CardVariant::Classic.label()} }
                        option { value: "Wide", {CardVariant::Wide.label()} }
                    }
                }
                // Raster scale
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "Skala pengambilan gambar (berlaku setelah mulai ulang)" }
                    input {
                        r#type: "number",
                        min: "1",
                        max: "6",
                        style: "width: 64px; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px; text-align: right;",
                        value: "{state.read().config.raster_scale}",
                        onchange: move |evt| {
                            if let Ok(scale) = evt.value().parse::<u32>()
                                && scale > 0
                            {
                                state.write().config.raster_scale = scale;
                            }
                        },
                    }
                }
            }

            // Save button
            button {
                style: "width: 100%; padding: 12px; border-radius: 8px; border: none; background: #4f46e5; color: white; font-size: 16px; margin-top: 8px; cursor: pointer;",
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let config = state.read().config.clone();
                        match svc.save_config(&config) {
                            Ok(()) => {
                                tracing::info!("settings saved");
                                save_msg.set(Some("Pengaturan tersimpan.".into()));
                            }
                            Err(e) => {
                                tracing::error!(error = %e, "failed to save settings");
                                save_msg.set(Some(format!("Gagal menyimpan: {e}")));
                            }
                        }
                    }
                },
                "Simpan Pengaturan"
            }
            if let Some(ref msg) = *save_msg.read() {
                p { style: "color: #15803d; font-size: 14px; text-align: center; margin-top: 8px;",
                    "{msg}"
                }
            }

            section { style: "margin: 24px 0 0 0;",
                h3 { "Tentang" }
                p { style: "color: #666; font-size: 14px;",
                    "Kartu v0.2.0"
                    br {}
                    "Generator Kartu Pelajar"
                    br {}
                    "PMPL-1.0-or-later"
                }
            }
        }
    }
}

fn variant_label(variant: &CardVariant) -> &'static str {
    match variant {
        CardVariant::Classic => "Classic",
        CardVariant::Wide => "Wide",
    }
}

fn variant_from_label(label: &str) -> Option<CardVariant> {
    match label {
        "Classic" => Some(CardVariant::Classic),
        "Wide" => Some(CardVariant::Wide),
        _ => None,
    }
}
