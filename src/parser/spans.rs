//! Content-stream interpretation into positioned spans.
//!
//! Only the text state needed for run extraction is tracked: the current
//! font, its size, the text matrix and the leading. Graphics state (`cm`,
//! `q`/`Q`) is ignored.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

use crate::model::is_bold_font;

use super::backend::{ContentOp, PageId, PdfBackend, PdfValue};

/// TJ adjustment (thousandths of text space) treated as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Font size used until a `Tf` operator sets one.
const DEFAULT_FONT_SIZE: f32 = 12.0;

/// A piece of text shown by one text operator.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Effective font size in points
    pub font_size: f32,
    /// Base font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Whether the font appears to be bold
    pub bold: bool,
}

impl PositionedSpan {
    /// Create a new span; boldness is guessed from the font name.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32, font_name: &str) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
            font_name: font_name.to_string(),
            bold: is_bold_font(font_name),
        }
    }
}

/// Text matrix plus line matrix, as maintained between `BT` and `ET`.
#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            leading: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, m: [f32; 6]) {
        let leading = self.leading;
        *self = Self {
            a: m[0],
            b: m[1],
            c: m[2],
            d: m[3],
            e: m[4],
            f: m[5],
            leading,
        };
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self, fallback: f32) {
        let leading = if self.leading != 0.0 {
            self.leading
        } else {
            fallback
        };
        self.translate(0.0, -leading);
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Interprets one page's operations and collects its spans.
pub struct SpanCollector<'a, B: PdfBackend> {
    backend: &'a B,
    page: PageId,
    fonts: HashMap<Vec<u8>, String>,
    normalize: bool,
}

impl<'a, B: PdfBackend> SpanCollector<'a, B> {
    /// Create a collector for one page.
    pub fn new(backend: &'a B, page: PageId, normalize: bool) -> Self {
        let fonts = backend.page_fonts(page).unwrap_or_else(|e| {
            log::debug!("No font resources for page {:?}: {}", page, e);
            HashMap::new()
        });
        Self {
            backend,
            page,
            fonts,
            normalize,
        }
    }

    /// Walk the operations and return every non-blank span in stream order.
    pub fn collect(&self, operations: &[ContentOp]) -> Vec<PositionedSpan> {
        let mut spans = Vec::new();
        let mut font_resource: Vec<u8> = Vec::new();
        let mut font_name = String::new();
        let mut font_size = DEFAULT_FONT_SIZE;
        let mut matrix = TextMatrix::default();
        let mut in_text = false;

        for op in operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text = true;
                    matrix = TextMatrix {
                        leading: matrix.leading,
                        ..TextMatrix::default()
                    };
                }
                "ET" => in_text = false,
                "Tf" => {
                    if let Some(PdfValue::Name(name)) = op.operands.first() {
                        font_resource = name.clone();
                        font_name = self
                            .fonts
                            .get(name)
                            .cloned()
                            .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
                    }
                    font_size = op.number(1).unwrap_or(DEFAULT_FONT_SIZE);
                }
                "TL" => matrix.leading = op.number(0).unwrap_or(0.0),
                "Td" => matrix.translate(op.number(0).unwrap_or(0.0), op.number(1).unwrap_or(0.0)),
                "TD" => {
                    let ty = op.number(1).unwrap_or(0.0);
                    matrix.leading = -ty;
                    matrix.translate(op.number(0).unwrap_or(0.0), ty);
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        let defaults = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
                        let mut m = [0.0; 6];
                        for (i, slot) in m.iter_mut().enumerate() {
                            *slot = op.number(i).unwrap_or(defaults[i]);
                        }
                        matrix.set(m);
                    }
                }
                "T*" => matrix.next_line(font_size),
                "Tj" | "TJ" | "'" | "\"" => {
                    if op.operator == "'" || op.operator == "\"" {
                        matrix.next_line(font_size);
                    }
                    if !in_text {
                        continue;
                    }
                    let text = self.shown_text(op, &font_resource);
                    if text.trim().is_empty() {
                        continue;
                    }
                    spans.push(PositionedSpan::new(
                        text,
                        matrix.e,
                        matrix.f,
                        (font_size * matrix.scale()).abs(),
                        &font_name,
                    ));
                }
                _ => {}
            }
        }

        spans
    }

    fn shown_text(&self, op: &ContentOp, font: &[u8]) -> String {
        let text = match op.operator.as_str() {
            "TJ" => match op.operands.first() {
                Some(PdfValue::Array(items)) => self.decode_tj_array(items, font),
                _ => String::new(),
            },
            "\"" => self.decode_operand(op.operands.get(2), font),
            _ => self.decode_operand(op.operands.first(), font),
        };
        if self.normalize {
            text.nfkc().collect()
        } else {
            text
        }
    }

    fn decode_operand(&self, operand: Option<&PdfValue>, font: &[u8]) -> String {
        match operand {
            Some(PdfValue::Str(bytes)) => self.backend.decode_text(self.page, font, bytes),
            _ => String::new(),
        }
    }

    /// Concatenate TJ strings, inserting a space for large positive gaps.
    fn decode_tj_array(&self, items: &[PdfValue], font: &[u8]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                PdfValue::Str(bytes) => {
                    combined.push_str(&self.backend.decode_text(self.page, font, bytes));
                }
                other => {
                    let Some(adjustment) = other.as_number() else {
                        continue;
                    };
                    if -adjustment > TJ_SPACE_THRESHOLD && needs_word_space(&combined) {
                        combined.push(' ');
                    }
                }
            }
        }
        combined
    }
}

fn needs_word_space(text: &str) -> bool {
    match text.chars().last() {
        Some(c) => !c.is_whitespace() && !is_spaceless_script_char(c),
        None => false,
    }
}

/// Characters of scripts written without word spaces (Chinese, Japanese kana).
///
/// Hangul is not included: Korean uses word spaces.
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF
        | 0x3400..=0x4DBF
        | 0x20000..=0x2EBEF
        | 0x3040..=0x309F
        | 0x30A0..=0x30FF
        | 0x3000..=0x303F)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use std::collections::BTreeMap;

    struct FakeBackend;

    impl PdfBackend for FakeBackend {
        fn pages(&self) -> BTreeMap<u32, PageId> {
            BTreeMap::from([(1, (1, 0))])
        }

        fn page_fonts(&self, _page: PageId) -> Result<HashMap<Vec<u8>, String>> {
            Ok(HashMap::from([
                (b"F1".to_vec(), "Helvetica".to_string()),
                (b"F2".to_vec(), "Helvetica-Bold".to_string()),
            ]))
        }

        fn page_operations(&self, _page: PageId) -> Result<Vec<ContentOp>> {
            Ok(Vec::new())
        }

        fn decode_text(&self, _page: PageId, _font: &[u8], bytes: &[u8]) -> String {
            String::from_utf8_lossy(bytes).to_string()
        }
    }

    fn name(s: &str) -> PdfValue {
        PdfValue::Name(s.as_bytes().to_vec())
    }

    fn string(s: &str) -> PdfValue {
        PdfValue::Str(s.as_bytes().to_vec())
    }

    fn num(n: f32) -> PdfValue {
        PdfValue::Real(n)
    }

    fn collect(ops: Vec<ContentOp>) -> Vec<PositionedSpan> {
        SpanCollector::new(&FakeBackend, (1, 0), true).collect(&ops)
    }

    #[test]
    fn test_tj_with_font_and_position() {
        let spans = collect(vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F2"), num(18.0)]),
            ContentOp::new("Td", vec![num(72.0), num(700.0)]),
            ContentOp::new("Tj", vec![string("Introduction")]),
            ContentOp::new("ET", vec![]),
        ]);

        assert_eq!(spans.len(), 1);
        let span = &spans[0];
        assert_eq!(span.text, "Introduction");
        assert_eq!((span.x, span.y), (72.0, 700.0));
        assert_eq!(span.font_size, 18.0);
        assert_eq!(span.font_name, "Helvetica-Bold");
        assert!(span.bold);
    }

    #[test]
    fn test_text_outside_bt_is_ignored() {
        let spans = collect(vec![ContentOp::new("Tj", vec![string("stray")])]);
        assert!(spans.is_empty());
    }

    #[test]
    fn test_blank_text_is_skipped() {
        let spans = collect(vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tj", vec![string("   ")]),
            ContentOp::new("ET", vec![]),
        ]);
        assert!(spans.is_empty());
    }

    #[test]
    fn test_tm_scales_font_size() {
        let spans = collect(vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F1"), num(1.0)]),
            ContentOp::new(
                "Tm",
                vec![num(24.0), num(0.0), num(0.0), num(24.0), num(50.0), num(600.0)],
            ),
            ContentOp::new("Tj", vec![string("Scaled")]),
            ContentOp::new("ET", vec![]),
        ]);
        assert_eq!(spans[0].font_size, 24.0);
        assert_eq!((spans[0].x, spans[0].y), (50.0, 600.0));
    }

    #[test]
    fn test_negative_font_size_is_mirrored_text() {
        let spans = collect(vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F1"), num(-12.0)]),
            ContentOp::new("Td", vec![num(72.0), num(700.0)]),
            ContentOp::new("Tj", vec![string("Mirrored")]),
            ContentOp::new("ET", vec![]),
        ]);
        assert_eq!(spans[0].font_size, 12.0);

        let runs = crate::parser::aggregate_page(spans, 0, 0.3);
        assert_eq!(runs[0].line_size, 12.0);
        assert!(crate::model::validate_runs(&runs).is_ok());
    }

    #[test]
    fn test_tj_array_inserts_word_space() {
        let spans = collect(vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F1"), num(12.0)]),
            ContentOp::new(
                "TJ",
                vec![PdfValue::Array(vec![
                    string("Hello"),
                    PdfValue::Integer(-250),
                    string("World"),
                    PdfValue::Integer(-30),
                    string("!"),
                ])],
            ),
            ContentOp::new("ET", vec![]),
        ]);
        assert_eq!(spans[0].text, "Hello World!");
    }

    #[test]
    fn test_leading_moves_to_next_line() {
        let spans = collect(vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F1"), num(10.0)]),
            ContentOp::new("TL", vec![num(14.0)]),
            ContentOp::new("Td", vec![num(72.0), num(700.0)]),
            ContentOp::new("Tj", vec![string("first")]),
            ContentOp::new("T*", vec![]),
            ContentOp::new("Tj", vec![string("second")]),
            ContentOp::new("'", vec![string("third")]),
            ContentOp::new("ET", vec![]),
        ]);
        let ys: Vec<f32> = spans.iter().map(|s| s.y).collect();
        assert_eq!(ys, vec![700.0, 686.0, 672.0]);
    }

    #[test]
    fn test_unicode_normalization() {
        let spans = collect(vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tj", vec![string("\u{FB01}nal")]),
            ContentOp::new("ET", vec![]),
        ]);
        assert_eq!(spans[0].text, "final");
    }

    #[test]
    fn test_spaceless_scripts() {
        assert!(is_spaceless_script_char('中'));
        assert!(is_spaceless_script_char('あ'));
        assert!(!is_spaceless_script_char('한'));
        assert!(!is_spaceless_script_char('a'));
        assert!(!needs_word_space("日本"));
        assert!(needs_word_space("Hello"));
        assert!(!needs_word_space("Hello "));
    }
}
