// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Kartu card generator: the card record, its field
// keys, inline image payloads, and the two card variants.

use serde::{Deserialize, Serialize};

use crate::error::KartuError;

/// Physical width of an ID-1 card in millimetres (ISO/IEC 7810).
pub const CARD_WIDTH_MM: f32 = 85.6;
/// Physical height of an ID-1 card in millimetres.
pub const CARD_HEIGHT_MM: f32 = 53.98;

/// Keys for the free-text fields of a card.
///
/// The issuance fields only appear on the [`CardVariant::Wide`] layout, but
/// they are always present on the record so switching variants never loses
/// data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextField {
    SchoolName,
    SchoolAddress,
    StudentName,
    StudentClass,
    /// National student identification number.
    Nisn,
    StudentAddress,
    PrincipalName,
    /// Civil-servant identification number of the principal.
    PrincipalNip,
    Notes,
    PlaceOfIssue,
    IssueDay,
    IssueMonth,
    IssueYear,
}

impl TextField {
    /// Form label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SchoolName => "Nama Sekolah",
            Self::SchoolAddress => "Alamat Sekolah",
            Self::StudentName => "Nama Lengkap Siswa",
            Self::StudentClass => "Kelas",
            Self::Nisn => "NISN",
            Self::StudentAddress => "Alamat",
            Self::PrincipalName => "Nama Kepala Sekolah",
            Self::PrincipalNip => "NIP Kepala Sekolah",
            Self::Notes => "Catatan",
            Self::PlaceOfIssue => "Tempat Penetapan",
            Self::IssueDay => "Tanggal",
            Self::IssueMonth => "Bulan",
            Self::IssueYear => "Tahun",
        }
    }

    /// Example value shown as the form input hint.
    pub fn example(&self) -> &'static str {
        match self {
            Self::SchoolName => "Contoh: SMA Negeri 1 Jakarta",
            Self::SchoolAddress => "Contoh: Jl. Budi Utomo No.7, Jakarta Pusat",
            Self::StudentName => "Contoh: Budi Santoso",
            Self::StudentClass => "Contoh: XII IPA 1",
            Self::Nisn => "Contoh: 0012345678",
            Self::StudentAddress => "Contoh: Jl. Merdeka No. 123",
            Self::PrincipalName => "Contoh: Dr. H. Susilo, M.Pd",
            Self::PrincipalNip => "Contoh: 196501011990031001",
            Self::Notes => "Contoh: Kartu ini tidak dapat dipindahtangankan",
            Self::PlaceOfIssue => "Contoh: Jakarta",
            Self::IssueDay => "Contoh: 17",
            Self::IssueMonth => "Contoh: Juli",
            Self::IssueYear => "Contoh: 2026",
        }
    }

    /// Placeholder substituted on the rendered card while the field is empty,
    /// so the preview always shows a fully populated layout.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::SchoolName => "Nama Sekolah",
            Self::SchoolAddress => "Alamat Sekolah",
            Self::StudentName => "Nama Lengkap Siswa",
            Self::StudentClass => "XII IPA 1",
            Self::Nisn => "0012345678",
            Self::StudentAddress => "Jl. Merdeka No. 123",
            Self::PrincipalName => "Nama Kepala Sekolah",
            Self::PrincipalNip => "19XXXXXXXX XXXXXX X XXX",
            Self::Notes => "Kartu ini milik sekolah dan tidak dapat dipindahtangankan.",
            Self::PlaceOfIssue => "Jakarta",
            Self::IssueDay => "17",
            Self::IssueMonth => "Juli",
            Self::IssueYear => "2026",
        }
    }

    /// All text fields, in form order.
    pub const ALL: [TextField; 13] = [
        Self::SchoolName,
        Self::SchoolAddress,
        Self::StudentName,
        Self::StudentClass,
        Self::Nisn,
        Self::StudentAddress,
        Self::PrincipalName,
        Self::PrincipalNip,
        Self::Notes,
        Self::PlaceOfIssue,
        Self::IssueDay,
        Self::IssueMonth,
        Self::IssueYear,
    ];
}

/// Keys for the image fields of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageField {
    SchoolLogo,
    StudentPhoto,
    QrCode,
    /// Translucent background mark, rendered on the wide variant only.
    Watermark,
}

impl ImageField {
    /// Upload button label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SchoolLogo => "Upload Logo Sekolah",
            Self::StudentPhoto => "Upload Foto Siswa",
            Self::QrCode => "Upload QR Code",
            Self::Watermark => "Upload Watermark",
        }
    }
}

/// Recognised payload MIME types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageMime {
    Png,
    Jpeg,
    Gif,
    WebP,
    Bmp,
}

impl ImageMime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::WebP => "image/webp",
            Self::Bmp => "image/bmp",
        }
    }

    /// Reverse lookup used when parsing a data URI.
    pub fn from_mime_str(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::WebP),
            "image/bmp" => Some(Self::Bmp),
            _ => None,
        }
    }
}

/// A self-contained inline-encoded bitmap: a `data:` URI carrying the MIME
/// type and the base64-encoded image bytes.
///
/// Once a payload is constructed from a picked file, no file handle or path
/// survives — the record is fully self-describing and can be fed to the
/// preview, the rasterizer, and every export strategy without touching the
/// filesystem again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    mime: ImageMime,
    base64: String,
}

impl ImagePayload {
    /// Wrap already-encoded image bytes (PNG, JPEG, ...) of a known MIME type.
    pub fn from_encoded(mime: ImageMime, bytes: &[u8]) -> Self {
        use base64::Engine;
        let base64 = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self { mime, base64 }
    }

    /// Parse a `data:image/...;base64,...` URI.
    pub fn from_data_uri(uri: &str) -> Result<Self, KartuError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| KartuError::ImagePayload("missing data: scheme".into()))?;
        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| KartuError::ImagePayload("missing payload separator".into()))?;
        let mime_str = header
            .strip_suffix(";base64")
            .ok_or_else(|| KartuError::ImagePayload("payload is not base64-encoded".into()))?;
        let mime = ImageMime::from_mime_str(mime_str)
            .ok_or_else(|| KartuError::ImagePayload(format!("unsupported MIME {mime_str}")))?;
        Ok(Self {
            mime,
            base64: data.to_string(),
        })
    }

    pub fn mime(&self) -> ImageMime {
        self.mime
    }

    /// The base64 text, without the URI header.
    pub fn base64_data(&self) -> &str {
        &self.base64
    }

    /// Render as a `data:` URI suitable for an `img` element `src`.
    pub fn as_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime.as_str(), self.base64)
    }

    /// Decode back to the original encoded image bytes.
    pub fn decode(&self) -> Result<Vec<u8>, KartuError> {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD
            .decode(&self.base64)
            .map_err(|err| KartuError::ImagePayload(format!("invalid base64 payload: {err}")))
    }
}

/// The two observed card layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardVariant {
    /// ID-1 proportioned card (512x323 design pixels), no issuance block.
    Classic,
    /// Wider layout (540x340 design pixels) with issuance block and watermark.
    Wide,
}

impl CardVariant {
    /// Design size in pixels at 1x scale. The DOCX export embeds the captured
    /// bitmap at exactly this size.
    pub fn design_size(&self) -> (u32, u32) {
        match self {
            Self::Classic => (512, 323),
            Self::Wide => (540, 340),
        }
    }

    /// Width over height of the design size.
    pub fn aspect_ratio(&self) -> f32 {
        let (w, h) = self.design_size();
        w as f32 / h as f32
    }

    /// Whether the layout carries the "Ditetapkan di ..." issuance block.
    pub fn has_issuance_block(&self) -> bool {
        matches!(self, Self::Wide)
    }

    /// Whether the layout renders the watermark payload.
    pub fn has_watermark(&self) -> bool {
        matches!(self, Self::Wide)
    }

    /// Settings label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Classic => "Klasik (512x323)",
            Self::Wide => "Lebar (540x340)",
        }
    }
}

/// The canonical in-memory representation of all card field values and image
/// payloads — the single source of truth for the preview and every export
/// strategy.
///
/// The record is immutable-by-replacement: [`CardRecord::with_text`] and
/// [`CardRecord::with_image`] return a new record equal to the old one except
/// for the given field. No validation is performed anywhere — every field is
/// free text and any decodable image is accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    pub school_name: String,
    pub school_address: String,
    pub student_name: String,
    pub student_class: String,
    pub nisn: String,
    pub student_address: String,
    pub principal_name: String,
    pub principal_nip: String,
    pub notes: String,
    pub place_of_issue: String,
    pub issue_day: String,
    pub issue_month: String,
    pub issue_year: String,
    pub school_logo: Option<ImagePayload>,
    pub student_photo: Option<ImagePayload>,
    pub qr_code: Option<ImagePayload>,
    pub watermark: Option<ImagePayload>,
}

impl CardRecord {
    /// A record with every text field empty and every image absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw value of a text field (may be empty).
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::SchoolName => &self.school_name,
            TextField::SchoolAddress => &self.school_address,
            TextField::StudentName => &self.student_name,
            TextField::StudentClass => &self.student_class,
            TextField::Nisn => &self.nisn,
            TextField::StudentAddress => &self.student_address,
            TextField::PrincipalName => &self.principal_name,
            TextField::PrincipalNip => &self.principal_nip,
            TextField::Notes => &self.notes,
            TextField::PlaceOfIssue => &self.place_of_issue,
            TextField::IssueDay => &self.issue_day,
            TextField::IssueMonth => &self.issue_month,
            TextField::IssueYear => &self.issue_year,
        }
    }

    /// The value a renderer should display: the field value, or its
    /// placeholder while the field is empty.
    pub fn display_text(&self, field: TextField) -> &str {
        let value = self.text(field);
        if value.is_empty() {
            field.placeholder()
        } else {
            value
        }
    }

    /// Replace one text field, leaving every other field untouched.
    pub fn with_text(&self, field: TextField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match field {
            TextField::SchoolName => &mut next.school_name,
            TextField::SchoolAddress => &mut next.school_address,
            TextField::StudentName => &mut next.student_name,
            TextField::StudentClass => &mut next.student_class,
            TextField::Nisn => &mut next.nisn,
            TextField::StudentAddress => &mut next.student_address,
            TextField::PrincipalName => &mut next.principal_name,
            TextField::PrincipalNip => &mut next.principal_nip,
            TextField::Notes => &mut next.notes,
            TextField::PlaceOfIssue => &mut next.place_of_issue,
            TextField::IssueDay => &mut next.issue_day,
            TextField::IssueMonth => &mut next.issue_month,
            TextField::IssueYear => &mut next.issue_year,
        };
        *slot = value.into();
        next
    }

    /// The payload of an image field, if one has been uploaded.
    pub fn image(&self, field: ImageField) -> Option<&ImagePayload> {
        match field {
            ImageField::SchoolLogo => self.school_logo.as_ref(),
            ImageField::StudentPhoto => self.student_photo.as_ref(),
            ImageField::QrCode => self.qr_code.as_ref(),
            ImageField::Watermark => self.watermark.as_ref(),
        }
    }

    /// Replace one image field, leaving every other field untouched.
    pub fn with_image(&self, field: ImageField, payload: ImagePayload) -> Self {
        let mut next = self.clone();
        let slot = match field {
            ImageField::SchoolLogo => &mut next.school_logo,
            ImageField::StudentPhoto => &mut next.student_photo,
            ImageField::QrCode => &mut next.qr_code,
            ImageField::Watermark => &mut next.watermark,
        };
        *slot = Some(payload);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty_and_absent() {
        let record = CardRecord::new();
        for field in TextField::ALL {
            assert_eq!(record.text(field), "");
        }
        assert!(record.school_logo.is_none());
        assert!(record.student_photo.is_none());
        assert!(record.qr_code.is_none());
        assert!(record.watermark.is_none());
    }

    #[test]
    fn with_text_replaces_only_the_given_field() {
        let base = CardRecord::new();
        let edited = base.with_text(TextField::StudentName, "Ani");

        assert_eq!(edited.text(TextField::StudentName), "Ani");
        for field in TextField::ALL {
            if field != TextField::StudentName {
                assert_eq!(edited.text(field), base.text(field));
            }
        }
        // The original record is untouched.
        assert_eq!(base.text(TextField::StudentName), "");
    }

    #[test]
    fn sequential_edits_apply_in_order() {
        let record = CardRecord::new()
            .with_text(TextField::StudentName, "Budi")
            .with_text(TextField::StudentClass, "X-1")
            .with_text(TextField::StudentName, "Budi Santoso");

        assert_eq!(record.text(TextField::StudentName), "Budi Santoso");
        assert_eq!(record.text(TextField::StudentClass), "X-1");
        assert_eq!(record.text(TextField::Nisn), "");
    }

    #[test]
    fn display_text_falls_back_to_placeholder() {
        let record = CardRecord::new();
        for field in TextField::ALL {
            assert_eq!(record.display_text(field), field.placeholder());
            assert!(!record.display_text(field).is_empty());
        }

        let record = record.with_text(TextField::SchoolName, "SMA Negeri 3");
        assert_eq!(record.display_text(TextField::SchoolName), "SMA Negeri 3");
    }

    #[test]
    fn with_image_replaces_only_the_given_field() {
        let payload = ImagePayload::from_encoded(ImageMime::Png, &[1, 2, 3]);
        let record = CardRecord::new().with_image(ImageField::QrCode, payload.clone());

        assert_eq!(record.image(ImageField::QrCode), Some(&payload));
        assert!(record.image(ImageField::StudentPhoto).is_none());
        assert!(record.image(ImageField::SchoolLogo).is_none());
    }

    #[test]
    fn payload_data_uri_round_trip() {
        let bytes = [0x89u8, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];
        let payload = ImagePayload::from_encoded(ImageMime::Png, &bytes);
        let uri = payload.as_data_uri();
        assert!(uri.starts_with("data:image/png;base64,"));

        let parsed = ImagePayload::from_data_uri(&uri).unwrap();
        assert_eq!(parsed, payload);
        assert_eq!(parsed.decode().unwrap(), bytes);
    }

    #[test]
    fn malformed_data_uri_is_rejected() {
        assert!(ImagePayload::from_data_uri("http://example.com/x.png").is_err());
        assert!(ImagePayload::from_data_uri("data:image/png,plain").is_err());
        assert!(ImagePayload::from_data_uri("data:text/html;base64,AAAA").is_err());
    }

    #[test]
    fn variant_geometry() {
        assert_eq!(CardVariant::Classic.design_size(), (512, 323));
        assert_eq!(CardVariant::Wide.design_size(), (540, 340));
        // Classic matches the physical ID-1 ratio to within a pixel of rounding.
        let physical = CARD_WIDTH_MM / CARD_HEIGHT_MM;
        assert!((CardVariant::Classic.aspect_ratio() - physical).abs() < 0.01);
        assert!(CardVariant::Wide.has_issuance_block());
        assert!(!CardVariant::Classic.has_watermark());
    }
}
