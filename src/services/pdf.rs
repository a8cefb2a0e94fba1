//! Certificate PDF rendering
//!
//! Landscape A4 page with a border and centered text lines. Positions are
//! given in millimetres from the top edge and flipped to PDF coordinates
//! when drawn.
//!
//! Only the builtin Helvetica faces are embedded, and they cover ASCII
//! reliably. Text is folded with [`fold_to_ascii`] before layout, so
//! accented Latin letters lose their marks and other scripts print as `?`.

use printpdf::{BuiltinFont, Color, Line, Mm, PdfDocument, Point, Rgb};

use crate::models::CertificateView;
use crate::utils::errors::{ClubPortalError, Result};

pub const PAGE_WIDTH_MM: f32 = 297.0;
pub const PAGE_HEIGHT_MM: f32 = 210.0;
const BORDER_INSET_MM: f32 = 10.0;
const PT_TO_MM: f32 = 0.3528;

/// Helvetica average advance, in em
const REGULAR_ADVANCE: f32 = 0.5;
const BOLD_ADVANCE: f32 = 0.55;

/// Dark slate used for the border and text
const INK: (f32, f32, f32) = (44.0 / 255.0, 62.0 / 255.0, 80.0 / 255.0);

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub size: f32,
    pub bold: bool,
    /// Baseline distance from the top edge
    pub y_from_top: f32,
}

impl TextLine {
    fn new(text: impl Into<String>, size: f32, bold: bool, y_from_top: f32) -> Self {
        Self {
            text: text.into(),
            size,
            bold,
            y_from_top,
        }
    }

    /// Approximate rendered width
    pub fn width_mm(&self) -> f32 {
        let advance = if self.bold { BOLD_ADVANCE } else { REGULAR_ADVANCE };
        self.text.chars().count() as f32 * self.size * advance * PT_TO_MM
    }

    /// Left edge that centers the line on the page, clamped inside the border
    pub fn x_mm(&self) -> f32 {
        ((PAGE_WIDTH_MM - self.width_mm()) / 2.0).max(BORDER_INSET_MM)
    }
}

/// Replace characters the builtin fonts cannot draw. Common Latin letters
/// with diacritics map to their base letters.
pub fn fold_to_ascii(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii() {
            folded.push(c);
            continue;
        }
        let replacement = match c {
            'À'..='Å' | 'Ā' | 'Ă' | 'Ą' => "A",
            'à'..='å' | 'ā' | 'ă' | 'ą' => "a",
            'Æ' => "AE",
            'æ' => "ae",
            'Ç' | 'Ć' | 'Č' => "C",
            'ç' | 'ć' | 'č' => "c",
            'Ď' | 'Đ' => "D",
            'ď' | 'đ' => "d",
            'È'..='Ë' | 'Ē' | 'Ė' | 'Ę' | 'Ě' => "E",
            'è'..='ë' | 'ē' | 'ė' | 'ę' | 'ě' => "e",
            'Ğ' => "G",
            'ğ' => "g",
            'Ì'..='Ï' | 'Ī' | 'İ' => "I",
            'ì'..='ï' | 'ī' | 'ı' => "i",
            'Ł' => "L",
            'ł' => "l",
            'Ñ' | 'Ń' | 'Ň' => "N",
            'ñ' | 'ń' | 'ň' => "n",
            'Ò'..='Ö' | 'Ø' | 'Ō' | 'Ő' => "O",
            'ò'..='ö' | 'ø' | 'ō' | 'ő' => "o",
            'Œ' => "OE",
            'œ' => "oe",
            'Ř' => "R",
            'ř' => "r",
            'Ś' | 'Š' | 'Ş' => "S",
            'ś' | 'š' | 'ş' => "s",
            'ß' => "ss",
            'Ť' => "T",
            'ť' => "t",
            'Ù'..='Ü' | 'Ū' | 'Ů' | 'Ű' => "U",
            'ù'..='ü' | 'ū' | 'ů' | 'ű' => "u",
            'Ý' | 'Ÿ' => "Y",
            'ý' | 'ÿ' => "y",
            'Ź' | 'Ż' | 'Ž' => "Z",
            'ź' | 'ż' | 'ž' => "z",
            '\u{2018}' | '\u{2019}' => "'",
            '\u{201C}' | '\u{201D}' => "\"",
            '\u{2013}' | '\u{2014}' => "-",
            c if c.is_whitespace() => " ",
            _ => "?",
        };
        folded.push_str(replacement);
    }
    folded
}

/// Text lines of a certificate, top to bottom
pub fn certificate_layout(view: &CertificateView) -> Vec<TextLine> {
    vec![
        TextLine::new("Certificate of Completion", 36.0, true, 40.0),
        TextLine::new("This is to certify that", 16.0, false, 70.0),
        TextLine::new(fold_to_ascii(&view.student_name), 24.0, true, 85.0),
        TextLine::new("has successfully completed", 16.0, false, 100.0),
        TextLine::new(fold_to_ascii(&view.event_name), 20.0, true, 115.0),
        TextLine::new(fold_to_ascii(&format!("Issued on: {}", view.date)), 14.0, false, 140.0),
        TextLine::new(fold_to_ascii(&format!("USN: {}", view.usn)), 12.0, false, 150.0),
    ]
}

/// Render a certificate to PDF bytes
pub fn render_certificate(view: &CertificateView) -> Result<Vec<u8>> {
    let title = format!("Certificate - {}", fold_to_ascii(&view.student_name));
    let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Certificate");
    let canvas = doc.get_page(page).get_layer(layer);

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ClubPortalError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ClubPortalError::Pdf(e.to_string()))?;

    let ink = Color::Rgb(Rgb::new(INK.0, INK.1, INK.2, None));
    canvas.set_outline_color(ink.clone());
    canvas.set_outline_thickness(1.0);
    canvas.set_fill_color(ink);

    let (left, bottom) = (BORDER_INSET_MM, BORDER_INSET_MM);
    let (right, top) = (PAGE_WIDTH_MM - BORDER_INSET_MM, PAGE_HEIGHT_MM - BORDER_INSET_MM);
    canvas.add_line(Line {
        points: vec![
            (Point::new(Mm(left), Mm(bottom)), false),
            (Point::new(Mm(right), Mm(bottom)), false),
            (Point::new(Mm(right), Mm(top)), false),
            (Point::new(Mm(left), Mm(top)), false),
        ],
        is_closed: true,
    });

    for line in certificate_layout(view) {
        let font = if line.bold { &bold } else { &regular };
        canvas.use_text(
            line.text.as_str(),
            line.size,
            Mm(line.x_mm()),
            Mm(PAGE_HEIGHT_MM - line.y_from_top),
            font,
        );
    }

    doc.save_to_bytes().map_err(|e| ClubPortalError::Pdf(e.to_string()))
}
