// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages, in Indonesian to match the card labels.
//
// Every technical error is mapped to a plain message with a clear suggestion.
// The severity levels drive how the UI presents the alert.

use crate::error::KartuError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Likely to succeed on a plain retry.
    Transient,
    /// User must do something first (pick a different file, allow popups).
    ActionRequired,
    /// Cannot be fixed by retrying — missing fonts, unsupported platform.
    Permanent,
}

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain summary (shown as the alert heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether a plain retry is worth offering.
    pub retriable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `KartuError` into the alert text shown to the user.
pub fn humanize_error(err: &KartuError) -> HumanError {
    match err {
        KartuError::ImagePayload(_) => HumanError {
            message: "Ada masalah dengan berkas gambar itu.".into(),
            suggestion: "Berkas mungkin rusak atau formatnya tidak dikenali. \
                         Coba simpan ulang sebagai PNG atau JPEG, lalu unggah lagi."
                .into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        KartuError::Raster(_) => HumanError {
            message: "Gagal mengambil gambar kartu.".into(),
            suggestion: "Silakan coba lagi.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        KartuError::FontUnavailable => HumanError {
            message: "Tidak ada huruf (font) yang dapat digunakan.".into(),
            suggestion: "Pasang font DejaVu Sans, Liberation Sans, atau Arial, \
                         lalu jalankan ulang aplikasi."
                .into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        KartuError::Pdf(_) => HumanError {
            message: "Gagal membuat PDF.".into(),
            suggestion: "Silakan coba lagi.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        KartuError::Document(_) => HumanError {
            message: "Gagal membuat dokumen Word.".into(),
            suggestion: "Silakan coba lagi.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        KartuError::Print(_) => HumanError {
            message: "Jendela cetak tidak dapat dibuka.".into(),
            suggestion: "Periksa pengaturan pemblokir pop-up dan aplikasi \
                         penampil bawaan Anda, lalu coba lagi."
                .into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        KartuError::ExportBusy => HumanError {
            message: "Masih ada proses ekspor yang sedang berjalan.".into(),
            suggestion: "Tunggu sampai proses selesai, lalu coba lagi.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        KartuError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "Aplikasi tidak punya izin menulis ke lokasi itu.".into(),
                    suggestion: "Pilih folder lain saat menyimpan, lalu coba lagi.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "Ada masalah saat membaca atau menulis berkas.".into(),
                    suggestion: "Silakan coba lagi. Jika terus terjadi, \
                                 periksa sisa ruang penyimpanan Anda."
                        .into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        KartuError::Serialization(_) => HumanError {
            message: "Aplikasi mengalami masalah data internal.".into(),
            suggestion: "Silakan coba lagi. Jika terus terjadi, laporkan masalah ini.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        KartuError::PlatformUnavailable => HumanError {
            message: "Fitur ini tidak tersedia di perangkat Anda.".into(),
            suggestion: "Gunakan ekspor PDF atau Word sebagai gantinya.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_failure_is_transient() {
        let human = humanize_error(&KartuError::Pdf("save failed".into()));
        assert_eq!(human.severity, Severity::Transient);
        assert!(human.retriable);
        assert!(human.message.contains("PDF"));
    }

    #[test]
    fn print_failure_asks_about_popups() {
        let human = humanize_error(&KartuError::Print("spawn failed".into()));
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.suggestion.contains("pop-up"));
    }

    #[test]
    fn missing_fonts_are_permanent() {
        let human = humanize_error(&KartuError::FontUnavailable);
        assert_eq!(human.severity, Severity::Permanent);
        assert!(!human.retriable);
    }

    #[test]
    fn busy_export_is_retriable() {
        let human = humanize_error(&KartuError::ExportBusy);
        assert!(human.retriable);
    }
}
