use super::ExportAssets;
use crate::error::ExportError;
use crate::{SummaryResult, PROJECT_TITLE};
use chrono::NaiveDate;
use docx_rs::{BreakType, Docx, Paragraph, Pic, Run, Style, StyleType};
use std::io::Cursor;

/// 2.5 inch logo width in EMU (914400 per inch).
const LOGO_WIDTH_EMU: u32 = 2_286_000;

/// Cover-style DOCX: logo, heading, metadata lines, separator, summary, source line.
pub fn render(
    result: &SummaryResult,
    assets: &ExportAssets,
    generated_on: NaiveDate,
) -> Result<Vec<u8>, ExportError> {
    let logo = &assets.logo;
    let logo_height_emu =
        (LOGO_WIDTH_EMU as u64 * logo.height() as u64 / logo.width().max(1) as u64) as u32;
    let pic = Pic::new(&logo.to_png()?).size(LOGO_WIDTH_EMU, logo_height_emu);

    let heading = Style::new("Heading1", StyleType::Paragraph)
        .name("Heading 1")
        .size(32)
        .bold();

    let doc = Docx::new()
        .add_style(heading)
        .add_paragraph(Paragraph::new().add_run(Run::new().add_image(pic)))
        .add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(PROJECT_TITLE))
                .style("Heading1"),
        )
        .add_paragraph(text_paragraph(&format!("Kaynak: {}", result.title)))
        .add_paragraph(text_paragraph(&format!(
            "Dil: {}   Tarih: {}",
            result.language.label(),
            generated_on.format("%d.%m.%Y")
        )))
        .add_paragraph(text_paragraph(&format!("\n{}\n", "-".repeat(40))))
        .add_paragraph(text_paragraph(&result.summary_text))
        .add_paragraph(text_paragraph(&format!(
            "\n{} {}",
            result.caption_label, result.source_url
        )));

    let mut buf = Cursor::new(Vec::new());
    doc.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;
    Ok(buf.into_inner())
}

/// One paragraph; embedded newlines become line breaks inside the run.
fn text_paragraph(text: &str) -> Paragraph {
    let mut run = Run::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        if !line.is_empty() {
            run = run.add_text(line);
        }
    }
    Paragraph::new().add_run(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::sample_result;
    use crate::export::Exporter;
    use crate::{ExportFormat, Language, DEFAULT_CAPTION};
    use std::io::Read;
    use zip::ZipArchive;

    fn document_xml(bytes: &[u8]) -> (String, Vec<String>) {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names = archive.file_names().map(str::to_string).collect();
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        (xml, names)
    }

    #[test]
    fn renders_a_zip_container() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 19).unwrap();
        let bytes = render(&sample_result(), &ExportAssets::default(), date).unwrap();
        assert!(bytes.starts_with(b"PK"));
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn document_has_every_section() {
        let result = sample_result();
        let date = NaiveDate::from_ymd_opt(2024, 5, 19).unwrap();
        let job = Exporter::default()
            .render_dated(&result, ExportFormat::Docx, date)
            .unwrap();
        let (xml, names) = document_xml(&job.payload);

        assert!(xml.contains(PROJECT_TITLE));
        assert!(xml.contains("Kaynak: Example"));
        assert!(xml.contains("Dil: Türkçe   Tarih: 19.05.2024"));
        assert!(xml.contains(&"-".repeat(40)));
        assert!(xml.contains("Lorem ipsum dolor."));
        assert!(xml.contains(&format!("{} {}", DEFAULT_CAPTION, result.source_url)));
        // Logo picture is packed under word/media.
        assert!(names.iter().any(|n| n.starts_with("word/media/") && n.ends_with(".png")));
    }

    #[test]
    fn language_line_uses_the_display_label() {
        let mut result = sample_result();
        result.language = Language::German;
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let bytes = render(&result, &ExportAssets::default(), date).unwrap();
        let (xml, _) = document_xml(&bytes);
        assert!(xml.contains("Dil: Deutsch (Almanca)   Tarih: 02.01.2025"));
    }
}
