//! Integration tests for run extraction from generated PDFs.

mod common;

use common::{build_pdf, report_pdf, Line};
use pdf_outline::{
    extract_outline, extract_outline_from_bytes, Error, ExtractOptions, Heading, Level,
    PageSelection, PdfOutline, RunExtractor,
};

#[test]
fn test_runs_carry_line_context() {
    let extractor =
        RunExtractor::from_bytes_with_options(&report_pdf(), ExtractOptions::default()).unwrap();
    assert_eq!(extractor.page_count(), 2);

    let runs = extractor.extract().unwrap();
    let title = &runs[0];
    assert_eq!(title.text, "Annual Report");
    assert_eq!(title.page, 0);
    assert_eq!(title.font_size, 24.0);
    assert_eq!(title.font_name, "Helvetica-Bold");
    assert!(title.bold);

    let mixed: Vec<_> = runs.iter().filter(|r| r.line_text == "2.1 Revenue").collect();
    assert_eq!(mixed.len(), 2);
    assert!(mixed.iter().all(|r| r.page == 1 && r.line_size == 16.0));
    assert_eq!(mixed[0].text, "2.1");
    assert_eq!(mixed[1].text, "Revenue");
    assert_eq!(mixed[1].font_size, 14.0);
}

#[test]
fn test_runs_in_reading_order() {
    let runs = RunExtractor::from_bytes_with_options(
        &report_pdf(),
        ExtractOptions::default().sequential(),
    )
    .unwrap()
    .extract()
    .unwrap();

    let pages: Vec<u32> = runs.iter().map(|r| r.page).collect();
    let mut sorted = pages.clone();
    sorted.sort();
    assert_eq!(pages, sorted);

    let page0: Vec<&str> = runs
        .iter()
        .filter(|r| r.page == 0)
        .map(|r| r.text.as_str())
        .collect();
    assert_eq!(
        page0,
        vec![
            "Annual Report",
            "1. Overview",
            "This year went well overall.",
            "1.1 Highlights",
            "42"
        ]
    );
}

#[test]
fn test_parallel_matches_sequential() {
    let pdf = report_pdf();
    let parallel = RunExtractor::from_bytes_with_options(&pdf, ExtractOptions::default())
        .unwrap()
        .extract()
        .unwrap();
    let sequential =
        RunExtractor::from_bytes_with_options(&pdf, ExtractOptions::default().sequential())
            .unwrap()
            .extract()
            .unwrap();
    assert_eq!(parallel, sequential);
}

#[test]
fn test_outline_from_pdf() {
    let outline = extract_outline_from_bytes(&report_pdf()).unwrap();

    assert_eq!(outline.title, "Annual Report");
    assert_eq!(
        outline.headings.first(),
        Some(&Heading::new(Level::H1, "1. Overview", 0))
    );
    assert!(outline
        .headings
        .contains(&Heading::new(Level::H2, "2.1 Revenue", 1)));
    assert!(outline
        .headings
        .contains(&Heading::new(Level::H3, "1.1 Highlights", 0)));
    assert_eq!(
        outline
            .headings
            .iter()
            .filter(|h| h.text == "2.1 Revenue")
            .count(),
        1
    );
    assert!(outline.headings.iter().all(|h| h.text != "42"));
}

#[test]
fn test_page_selection_keeps_document_indices() {
    let outline = PdfOutline::new()
        .with_pages(PageSelection::Pages(vec![2]))
        .extract_bytes(&report_pdf())
        .unwrap();

    // Page 0 is not selected, so there is no title and ranks are local.
    assert_eq!(outline.title, "");
    assert_eq!(
        outline.headings,
        vec![
            Heading::new(Level::H1, "2.1 Revenue", 1),
            Heading::new(Level::H2, "Revenue grew in every region.", 1),
        ]
    );
}

#[test]
fn test_parsed_page_list_with_wide_range() {
    let selection = PageSelection::parse("2,5-4000000000").unwrap();
    let runs = RunExtractor::from_bytes_with_options(
        &report_pdf(),
        ExtractOptions::default().with_pages(selection),
    )
    .unwrap()
    .extract()
    .unwrap();

    assert!(!runs.is_empty());
    assert!(runs.iter().all(|r| r.page == 1));
}

#[test]
fn test_empty_page() {
    let pdf = build_pdf(&[vec![], vec![Line::plain("Only", 12.0)]]);
    let runs = RunExtractor::from_bytes_with_options(&pdf, ExtractOptions::default())
        .unwrap()
        .extract()
        .unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].page, 1);

    let outline = extract_outline_from_bytes(&pdf).unwrap();
    assert_eq!(outline.title, "");
    assert!(outline.headings.is_empty());
}

#[test]
fn test_extract_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    std::fs::write(&path, report_pdf()).unwrap();

    let outline = extract_outline(&path).unwrap();
    assert_eq!(outline.title, "Annual Report");
}

#[test]
fn test_not_a_pdf() {
    assert!(matches!(
        extract_outline_from_bytes(b"PK\x03\x04 zip archive"),
        Err(Error::UnknownFormat)
    ));
}
