//! Line aggregation: positioned spans to text runs.
//!
//! Spans are ordered top to bottom, then left to right, and a span joins
//! the current line while its baseline stays within a fraction of its font
//! size of the line's first baseline. Each surviving span becomes one
//! [`TextRun`] that also carries its line's text and largest size.

use std::cmp::Ordering;

use crate::model::{round_size, TextRun};

use super::spans::PositionedSpan;

/// Group spans into visual lines, in reading order.
pub fn group_into_lines(mut spans: Vec<PositionedSpan>, tolerance: f32) -> Vec<Vec<PositionedSpan>> {
    // PDF Y grows upward, so higher baselines come first.
    spans.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
    });

    let mut lines: Vec<Vec<PositionedSpan>> = Vec::new();
    let mut current: Vec<PositionedSpan> = Vec::new();
    let mut baseline: Option<f32> = None;

    for span in spans {
        match baseline {
            Some(y) if (span.y - y).abs() <= span.font_size * tolerance => current.push(span),
            _ => {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                baseline = Some(span.y);
                current.push(span);
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    for line in &mut lines {
        line.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
    }
    lines
}

/// Turn one line's spans into runs sharing `line_text` and `line_size`.
///
/// Blank spans are dropped first; a line with nothing left yields no runs.
pub fn line_to_runs(spans: &[PositionedSpan], page: u32) -> Vec<TextRun> {
    let visible: Vec<&PositionedSpan> = spans.iter().filter(|s| !s.text.trim().is_empty()).collect();
    if visible.is_empty() {
        return Vec::new();
    }

    let line_text = visible
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let line_size = round_size(visible.iter().map(|s| s.font_size).fold(0.0, f32::max));

    visible
        .into_iter()
        .map(|span| TextRun {
            text: span.text.trim().to_string(),
            font_size: round_size(span.font_size),
            font_name: span.font_name.clone(),
            bold: span.bold,
            page,
            line_text: line_text.clone(),
            line_size,
        })
        .collect()
}

/// Aggregate a page's spans into runs, in reading order.
pub fn aggregate_page(spans: Vec<PositionedSpan>, page: u32, tolerance: f32) -> Vec<TextRun> {
    let lines = group_into_lines(spans, tolerance);
    log::debug!("Page {}: {} lines", page, lines.len());
    lines
        .iter()
        .flat_map(|line| line_to_runs(line, page))
        .collect()
}
