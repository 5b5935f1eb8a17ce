// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export file naming.

/// Base name shared by every export artifact.
const BASE_NAME: &str = "kartu-pelajar";

/// Compute the download file name for an export artifact.
///
/// Every whitespace run in the student name collapses to a single underscore;
/// an empty (or all-whitespace) name yields the bare base name.
pub fn export_file_name(student_name: &str, extension: &str) -> String {
    let sanitized = student_name.split_whitespace().collect::<Vec<_>>().join("_");
    if sanitized.is_empty() {
        format!("{BASE_NAME}.{extension}")
    } else {
        format!("{BASE_NAME}-{sanitized}.{extension}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_with_space_is_underscored() {
        assert_eq!(
            export_file_name("Budi Santoso", "pdf"),
            "kartu-pelajar-Budi_Santoso.pdf"
        );
        assert_eq!(
            export_file_name("Budi Santoso", "docx"),
            "kartu-pelajar-Budi_Santoso.docx"
        );
    }

    #[test]
    fn empty_name_uses_bare_base() {
        assert_eq!(export_file_name("", "pdf"), "kartu-pelajar.pdf");
        assert_eq!(export_file_name("", "docx"), "kartu-pelajar.docx");
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(
            export_file_name("  Ani\t Putri  ", "pdf"),
            "kartu-pelajar-Ani_Putri.pdf"
        );
        // A name of pure whitespace counts as empty.
        assert_eq!(export_file_name("   ", "pdf"), "kartu-pelajar.pdf");
    }

    #[test]
    fn single_word_name_is_kept_verbatim() {
        assert_eq!(export_file_name("Ani", "pdf"), "kartu-pelajar-Ani.pdf");
    }
}
