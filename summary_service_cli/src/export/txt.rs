use crate::SummaryResult;

/// Plain text export: title, blank line, summary. No branding, no URL.
pub fn render(result: &SummaryResult) -> Vec<u8> {
    format!("{}\n\n{}", result.title, result.summary_text).into_bytes()
}
