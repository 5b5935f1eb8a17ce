// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — wires the export pipeline and platform bridge
// together and provides async-friendly methods for the Dioxus UI to call.
//
// Captures and package assembly are CPU-bound and can take hundreds of
// milliseconds at 3x scale, so every export runs on the blocking pool
// rather than the UI task loop.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use kartu_bridge::PlatformBridge;
use kartu_core::AppConfig;
use kartu_core::card::{CardRecord, CardVariant};
use kartu_core::error::{KartuError, Result};
use kartu_document::{ExportArtifact, ExportPipeline};
use tracing::info;

use super::data_dir;

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
///
/// All fields are cheaply cloneable (Arc-wrapped) so that the struct can be
/// passed into closures and async blocks without lifetime issues.
#[derive(Clone)]
pub struct AppServices {
    pipeline: Arc<ExportPipeline>,
    bridge: Arc<dyn PlatformBridge>,
    config: Arc<Mutex<AppConfig>>,
    data_dir: PathBuf,
}

impl AppServices {
    /// Initialise all services. Call once at app startup.
    pub fn init() -> Self {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");

        let config = load_config(&dir).unwrap_or_default();
        let pipeline = Arc::new(ExportPipeline::with_defaults(config.raster_scale));
        let bridge = kartu_bridge::native_bridge();

        info!(platform = bridge.platform_name(), "app services initialised");

        Self {
            pipeline,
            bridge,
            config: Arc::new(Mutex::new(config)),
            data_dir: dir,
        }
    }

    // -- Export strategies ----------------------------------------------------

    /// Run the PDF strategy against a snapshot of the current record.
    pub async fn export_pdf(
        &self,
        record: CardRecord,
        variant: CardVariant,
    ) -> Result<ExportArtifact> {
        let pipeline = Arc::clone(&self.pipeline);
        tokio::task::spawn_blocking(move || pipeline.export_pdf(&record, variant))
            .await
            .unwrap_or_else(|err| Err(KartuError::Raster(format!("export task failed: {err}"))))
    }

    /// Run the DOCX strategy against a snapshot of the current record.
    pub async fn export_document(
        &self,
        record: CardRecord,
        variant: CardVariant,
    ) -> Result<ExportArtifact> {
        let pipeline = Arc::clone(&self.pipeline);
        tokio::task::spawn_blocking(move || pipeline.export_document(&record, variant))
            .await
            .unwrap_or_else(|err| Err(KartuError::Raster(format!("export task failed: {err}"))))
    }

    /// Run the print strategy: capture, build the print page, and hand it to
    /// the platform bridge.
    pub async fn print_card(&self, record: CardRecord, variant: CardVariant) -> Result<()> {
        let pipeline = Arc::clone(&self.pipeline);
        let bridge = Arc::clone(&self.bridge);
        tokio::task::spawn_blocking(move || {
            let page = pipeline.capture_print_page(&record, variant)?;
            bridge.open_print_context(&page)
        })
        .await
        .unwrap_or_else(|err| Err(KartuError::Raster(format!("export task failed: {err}"))))
    }

    /// Offer a save dialog pre-filled with the artifact name and write the
    /// bytes to the chosen location. Returns None when the user cancels.
    pub async fn deliver(&self, artifact: ExportArtifact) -> Result<Option<PathBuf>> {
        tokio::task::spawn_blocking(move || {
            let Some(path) = rfd::FileDialog::new()
                .set_file_name(artifact.file_name.as_str())
                .save_file()
            else {
                return Ok(None);
            };
            std::fs::write(&path, &artifact.bytes)?;
            info!(path = %path.display(), bytes = artifact.bytes.len(), "export delivered");
            Ok(Some(path))
        })
        .await
        .unwrap_or_else(|err| Err(KartuError::Raster(format!("export task failed: {err}"))))
    }

    // -- Config persistence ---------------------------------------------------

    /// Get a clone of the current config.
    pub fn config(&self) -> AppConfig {
        self.config.lock().expect("config lock poisoned").clone()
    }

    /// Update and persist the config.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        *self.config.lock().expect("config lock poisoned") = config.clone();
        persist_config(&self.data_dir, config)
    }
}

// -- Config file persistence -------------------------------------------------

const CONFIG_FILE: &str = "config.json";

fn load_config(data_dir: &std::path::Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    serde_json::from_str(&data).ok()
}

fn persist_config(data_dir: &std::path::Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}
