//! Synthetic PDF generation shared by the integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One line of text: spans shown left to right on the same baseline.
pub struct Line {
    pub spans: Vec<(&'static str, f32, &'static str)>,
}

impl Line {
    /// A line made of a single span in the regular font.
    pub fn plain(text: &'static str, size: f32) -> Self {
        Self {
            spans: vec![(text, size, "F1")],
        }
    }

    /// A line made of a single span in the bold font.
    pub fn bold(text: &'static str, size: f32) -> Self {
        Self {
            spans: vec![(text, size, "F2")],
        }
    }

    /// Append another span on the same baseline.
    pub fn then(mut self, text: &'static str, size: f32) -> Self {
        self.spans.push((text, size, "F1"));
        self
    }
}

/// Build a PDF whose pages hold the given lines, top to bottom.
///
/// Fonts: `F1` is Helvetica, `F2` is Helvetica-Bold.
pub fn build_pdf(pages: &[Vec<Line>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        let mut y = 760.0_f32;
        for line in lines {
            let mut x = 72.0_f32;
            let mut tallest = 0.0_f32;
            for &(text, size, font) in &line.spans {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec![font.into(), size.into()]));
                operations.push(Operation::new("Td", vec![x.into(), y.into()]));
                operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
                operations.push(Operation::new("ET", vec![]));
                x += text.len() as f32 * size * 0.6 + 6.0;
                tallest = tallest.max(size);
            }
            y -= tallest * 2.0;
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// A two-page report: title, numbered sections and body text.
pub fn report_pdf() -> Vec<u8> {
    build_pdf(&[
        vec![
            Line::bold("Annual Report", 24.0),
            Line::plain("1. Overview", 18.0),
            Line::plain("This year went well overall.", 10.0),
            Line::plain("1.1 Highlights", 14.0),
            Line::plain("42", 10.0),
        ],
        vec![
            Line::plain("2. Finances", 18.0),
            Line::plain("2.1", 16.0).then("Revenue", 14.0),
            Line::plain("Revenue grew in every region.", 10.0),
        ],
    ])
}
