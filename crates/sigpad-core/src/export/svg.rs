//! SVG markup export.

use crate::document::SignatureData;
use crate::stroke::SignatureStroke;
use std::fmt::Write as _;

/// Render a document as standalone SVG markup.
///
/// Each stroke with at least two points becomes one `<path>` built from
/// `M`/`L` commands. Shorter strokes leave no mark and emit nothing.
pub fn to_svg(document: &SignatureData) -> String {
    let paths: Vec<String> = document
        .strokes
        .iter()
        .filter(|s| s.is_drawable())
        .map(stroke_to_path)
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n  \
         <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n  \
         {}\n\
         </svg>",
        document.width,
        document.height,
        escape_attr(&document.background_color),
        paths.join("\n  ")
    )
}

fn stroke_to_path(stroke: &SignatureStroke) -> String {
    let mut d = String::new();
    for (i, point) in stroke.points.iter().enumerate() {
        let command = if i == 0 { "M" } else { " L" };
        // Writing to a String cannot fail
        let _ = write!(d, "{} {} {}", command, point.x, point.y);
    }

    format!(
        "<path d=\"{}\" stroke=\"{}\" stroke-width=\"{}\" fill=\"none\" stroke-linecap=\"round\" stroke-linejoin=\"round\"/>",
        d,
        escape_attr(&stroke.color),
        stroke.width
    )
}

/// Escape text for use inside a double-quoted XML attribute.
fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
