use crate::{ExportFormat, ExportJob, FILENAME_SUFFIX};
use regex::Regex;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

const SLUG_MAX_CHARS: usize = 30;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("static regex must compile"));

/// Lowercases, collapses every run of non-word characters into `_` and keeps
/// the first 30 characters.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_WORD
        .replace_all(&lowered, "_")
        .chars()
        .take(SLUG_MAX_CHARS)
        .collect()
}

/// `<stem>_ozet.<ext>`
pub fn export_filename(file_stem: &str, format: ExportFormat) -> String {
    format!("{}{}.{}", file_stem, FILENAME_SUFFIX, format.extension())
}

/// `Content-Disposition` value with an ASCII fallback name and the exact
/// UTF-8 name in `filename*`.
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' })
        .collect();
    let encoded: String = url::form_urlencoded::byte_serialize(filename.as_bytes()).collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback, encoded
    )
}

/// Writes the export payload into `dir` under its suggested filename.
pub fn save_export(job: &ExportJob, dir: &Path) -> std::io::Result<PathBuf> {
    let path = dir.join(&job.suggested_filename);
    let mut file = File::create(&path)?;
    file.write_all(&job.payload)?;
    println!("✅ {} oluşturuldu.", path.display());
    Ok(path)
}
