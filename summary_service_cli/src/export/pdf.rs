use super::branding::Logo;
use super::qr::qr_image;
use super::ExportAssets;
use crate::error::ExportError;
use crate::{SummaryResult, PROJECT_TITLE};
use printpdf::{
    BuiltinFont, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, IndirectFontRef,
    Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Px,
};

// A4, millimetres, origin bottom-left.
const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN_X: f32 = 10.0;
const BODY_TOP: f32 = PAGE_H - 50.0;
const BODY_BOTTOM: f32 = 25.0;
const LINE_H: f32 = 6.0;
const BODY_PT: f32 = 12.0;
const WRAP_CHARS: usize = 80;
const LOGO_W: f32 = 30.0;
const QR_W: f32 = 30.0;
const QR_X: f32 = 160.0;

fn pdf_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Pdf(e.to_string())
}

/// Branded A4 PDF: header and footer on every page, wrapped title and summary,
/// QR code of the source URL and the caption line.
pub fn render(result: &SummaryResult, assets: &ExportAssets) -> Result<Vec<u8>, ExportError> {
    let mut writer = PdfWriter::new(&result.title, assets)?;
    writer.write_body(result)?;
    writer.finish()
}

struct PdfWriter<'a> {
    doc: PdfDocumentReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    builtin_fonts: bool,
    logo: &'a Logo,
    layer: PdfLayerReference,
    page_no: usize,
    cursor: f32,
}

impl<'a> PdfWriter<'a> {
    fn new(doc_title: &str, assets: &'a ExportAssets) -> Result<Self, ExportError> {
        let (doc, page, layer) = PdfDocument::new(doc_title, Mm(PAGE_W), Mm(PAGE_H), "Sayfa 1");

        let (regular, bold, builtin_fonts) = match (&assets.font_regular, &assets.font_bold) {
            (Some(regular), bold) => {
                let regular_ref = doc.add_external_font(regular.as_slice()).map_err(pdf_err)?;
                let bold_ref = match bold {
                    Some(bytes) => doc.add_external_font(bytes.as_slice()).map_err(pdf_err)?,
                    None => regular_ref.clone(),
                };
                (regular_ref, bold_ref, false)
            }
            (None, _) => (
                doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?,
                doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?,
                true,
            ),
        };

        let layer = doc.get_page(page).get_layer(layer);
        let writer = Self {
            doc,
            regular,
            bold,
            builtin_fonts,
            logo: &assets.logo,
            layer,
            page_no: 1,
            cursor: BODY_TOP,
        };
        writer.decorate_page();
        Ok(writer)
    }

    fn write_body(&mut self, result: &SummaryResult) -> Result<(), ExportError> {
        self.write_wrapped(&format!("{}\n\n{}", result.title, result.summary_text));

        // QR block: gap, image, caption. Kept together on one page.
        let needed = 10.0 + QR_W + 5.0 + 2.0 * LINE_H;
        if self.cursor - needed < BODY_BOTTOM {
            self.new_page();
        }
        let qr_bottom = self.cursor - 10.0 - QR_W;
        let qr = qr_image(&result.source_url)?;
        let (w, h) = (qr.width(), qr.height());
        place_image(
            &self.layer,
            ColorSpace::Greyscale,
            w,
            h,
            qr.into_raw(),
            QR_X,
            qr_bottom,
            QR_W,
        );
        self.cursor = qr_bottom - 5.0;

        self.write_wrapped(&format!("{} {}", result.caption_label, result.source_url));
        Ok(())
    }

    fn write_wrapped(&mut self, text: &str) {
        for line in wrap_lines(text, WRAP_CHARS) {
            if self.cursor < BODY_BOTTOM {
                self.new_page();
            }
            if !line.is_empty() {
                let line = self.encode(&line);
                self.layer
                    .use_text(line, BODY_PT, Mm(MARGIN_X), Mm(self.cursor), &self.regular);
            }
            self.cursor -= LINE_H;
        }
    }

    fn new_page(&mut self) {
        self.page_no += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_W),
            Mm(PAGE_H),
            format!("Sayfa {}", self.page_no),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = BODY_TOP;
        self.decorate_page();
    }

    /// Header (logo, project title, rule) and footer (page number).
    fn decorate_page(&self) {
        let logo_h = LOGO_W * self.logo.height() as f32 / self.logo.width() as f32;
        place_image(
            &self.layer,
            ColorSpace::Rgb,
            self.logo.width(),
            self.logo.height(),
            self.logo.rgb_pixels().to_vec(),
            MARGIN_X,
            PAGE_H - 8.0 - logo_h,
            LOGO_W,
        );

        let title = self.encode(PROJECT_TITLE);
        self.layer
            .use_text(title, 14.0, Mm(MARGIN_X), Mm(PAGE_H - 32.0), &self.bold);

        self.layer.set_outline_thickness(0.5);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN_X), Mm(PAGE_H - 35.0)), false),
                (Point::new(Mm(PAGE_W - MARGIN_X), Mm(PAGE_H - 35.0)), false),
            ],
            is_closed: false,
        });

        let footer = format!("Sayfa {}", self.page_no);
        self.layer
            .use_text(footer, 8.0, Mm(PAGE_W / 2.0 - 5.0), Mm(10.0), &self.regular);
    }

    fn encode(&self, text: &str) -> String {
        if self.builtin_fonts {
            fold_to_latin1(text)
        } else {
            text.to_string()
        }
    }

    fn finish(self) -> Result<Vec<u8>, ExportError> {
        self.doc.save_to_bytes().map_err(pdf_err)
    }
}

#[allow(clippy::too_many_arguments)]
fn place_image(
    layer: &PdfLayerReference,
    color_space: ColorSpace,
    px_w: u32,
    px_h: u32,
    data: Vec<u8>,
    x: f32,
    y: f32,
    width_mm: f32,
) {
    let image = Image::from(ImageXObject {
        width: Px(px_w as usize),
        height: Px(px_h as usize),
        color_space,
        bits_per_component: ColorBits::Bit8,
        interpolate: false,
        image_data: data,
        image_filter: None,
        smask: None,
        clipping_bbox: None,
    });
    let dpi = px_w as f32 * 25.4 / width_mm;
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x)),
            translate_y: Some(Mm(y)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
}

/// Greedy word wrap on char counts. Explicit newlines are kept, words longer
/// than a line are hard-split.
fn wrap_lines(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_chars {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let sep = usize::from(current_len > 0);
            if current_len + sep + word.len() > max_chars {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            } else if sep == 1 {
                current.push(' ');
                current_len += 1;
            }
            current_len += word.len();
            current.extend(word);
        }
        lines.push(current);
    }
    lines
}

/// The built-in PDF fonts only cover Latin-1; fold what we can, replace the rest.
fn fold_to_latin1(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'ğ' => out.push('g'),
            'Ğ' => out.push('G'),
            'ş' => out.push('s'),
            'Ş' => out.push('S'),
            'ı' => out.push('i'),
            'İ' => out.push('I'),
            '‘' | '’' => out.push('\''),
            '“' | '”' => out.push('"'),
            '–' | '—' => out.push('-'),
            '…' => out.push_str("..."),
            c if (c as u32) <= 0xFF => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}
