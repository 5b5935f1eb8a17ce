// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print page assembly — a self-contained HTML page holding only the captured
// card bitmap, with zeroed margins, that asks the platform to print itself as
// soon as it loads and closes shortly after.

/// Build the print-context page around an inline image payload URI.
///
/// The page carries no external references: the capture travels inside the
/// `src` attribute, so the context works wherever it is opened.
pub fn build_print_page(image_data_uri: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html>\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<title>Cetak Kartu Pelajar</title>\n",
            "<style>\n",
            "@page {{ margin: 0; }}\n",
            "html, body {{ margin: 0; padding: 0; }}\n",
            "img {{ display: block; width: 100%; height: auto; }}\n",
            "</style>\n",
            "</head>\n",
            "<body>\n",
            "<img src=\"{uri}\" alt=\"Kartu Pelajar\">\n",
            "<script>\n",
            "window.addEventListener('load', function () {{\n",
            "  window.print();\n",
            "  setTimeout(function () {{ window.close(); }}, 500);\n",
            "}});\n",
            "</script>\n",
            "</body>\n",
            "</html>\n",
        ),
        uri = image_data_uri
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_embeds_the_capture_inline() {
        let uri = "data:image/png;base64,AAAA";
        let page = build_print_page(uri);
        assert!(page.contains(&format!("src=\"{uri}\"")));
    }

    #[test]
    fn page_auto_prints_and_closes() {
        let page = build_print_page("data:image/png;base64,AAAA");
        assert!(page.contains("window.print()"));
        assert!(page.contains("window.close()"));
    }

    #[test]
    fn page_zeroes_print_margins() {
        let page = build_print_page("data:image/png;base64,AAAA");
        assert!(page.contains("@page { margin: 0; }"));
        assert!(page.contains("width: 100%"));
    }
}
