//! Fixed-region hint extraction from the first page.
//!
//! Regions are approximate rectangles in top-left-origin page coordinates,
//! matching the box layout of the printed declaration form. They only bias
//! the model prompt; a region that captures nothing yields an empty hint,
//! never an error.

use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use tracing::trace;

use super::DeclarationPdf;

/// A text run recovered from the content stream.
///
/// Anchored at the run's text-space start position; `y` grows downward from
/// the top of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// Rectangle in top-left-origin page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Region {
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

/// A named hint region plus its prompt phrasing.
#[derive(Debug, Clone)]
pub struct RegionBox {
    /// Name used in the hint line.
    pub name: &'static str,
    /// Example value quoted alongside the name.
    pub example: Option<&'static str>,
    /// Phrase the hint as "Full text found ..." instead of "Text found ...".
    pub full_text: bool,
    pub region: Region,
}

/// Hint text extracted for one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionHint {
    pub name: &'static str,
    pub example: Option<&'static str>,
    pub full_text: bool,
    pub text: String,
}

/// The fixed set of first-page hint regions.
///
/// Coordinates are not validated against the page size; a box falling
/// outside the page simply captures nothing.
#[derive(Debug, Clone)]
pub struct RegionMap {
    boxes: Vec<RegionBox>,
    line_tolerance: f32,
}

impl Default for RegionMap {
    fn default() -> Self {
        Self::new(4.0)
    }
}

impl RegionMap {
    pub fn new(line_tolerance: f32) -> Self {
        let boxes = vec![
            RegionBox {
                name: "Customs Reference Code E",
                example: Some("CBBE1"),
                full_text: false,
                region: Region::new(600.0, 40.0, 680.0, 60.0),
            },
            RegionBox {
                name: "Declarant's Sequence Number",
                example: Some("2024 #3041"),
                full_text: false,
                region: Region::new(650.0, 110.0, 800.0, 130.0),
            },
            RegionBox {
                name: "Box 11 value",
                example: None,
                full_text: false,
                region: Region::new(170.0, 100.0, 250.0, 130.0),
            },
            RegionBox {
                name: "Box 31 Description value",
                example: None,
                full_text: false,
                region: Region::new(550.0, 300.0, 800.0, 450.0),
            },
            RegionBox {
                name: "Box 31",
                example: None,
                full_text: true,
                region: Region::new(400.0, 280.0, 800.0, 480.0),
            },
            RegionBox {
                name: "D.Val value",
                example: None,
                full_text: false,
                region: Region::new(450.0, 500.0, 550.0, 530.0),
            },
            RegionBox {
                name: "D.Qty value",
                example: None,
                full_text: false,
                region: Region::new(580.0, 500.0, 680.0, 530.0),
            },
        ];
        Self {
            boxes,
            line_tolerance,
        }
    }

    pub fn boxes(&self) -> &[RegionBox] {
        &self.boxes
    }

    /// Extract hint text for every region from the given fragments.
    pub fn extract_hints(&self, fragments: &[TextFragment]) -> Vec<RegionHint> {
        self.boxes
            .iter()
            .map(|b| RegionHint {
                name: b.name,
                example: b.example,
                full_text: b.full_text,
                text: extract_region(fragments, &b.region, self.line_tolerance),
            })
            .collect()
    }

    /// Collect fragments from the first page and extract all hints.
    pub fn hints_for(&self, pdf: &DeclarationPdf, fallback_page_height: f32) -> Vec<RegionHint> {
        let fragments = match pdf.first_page_id() {
            Some(page_id) => collect_fragments(pdf.document(), page_id, fallback_page_height),
            None => Vec::new(),
        };
        self.extract_hints(&fragments)
    }
}

/// Join the fragments inside `region` into hint text, top-to-bottom and
/// left-to-right, grouping nearby baselines into single lines.
pub fn extract_region(fragments: &[TextFragment], region: &Region, line_tolerance: f32) -> String {
    let mut inside: Vec<&TextFragment> = fragments
        .iter()
        .filter(|f| region.contains(f.x, f.y))
        .collect();

    inside.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal));

    // Group by baseline proximity, then order each line left-to-right.
    let mut lines: Vec<Vec<(f32, &str)>> = Vec::new();
    let mut current_y = f32::NEG_INFINITY;

    for fragment in inside {
        let piece = fragment.text.trim();
        if piece.is_empty() {
            continue;
        }
        if lines.is_empty() || (fragment.y - current_y).abs() > line_tolerance {
            lines.push(Vec::new());
            current_y = fragment.y;
        }
        if let Some(line) = lines.last_mut() {
            line.push((fragment.x, piece));
        }
    }

    for line in &mut lines {
        line.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    }

    lines
        .iter()
        .map(|line| {
            line.iter()
                .map(|(_, text)| *text)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Recover positioned text runs from a page's content stream.
///
/// Best effort: only the text positioning operators are tracked, and literal
/// strings decode as Latin-1 (UTF-16BE when BOM-prefixed). Any failure
/// simply produces no fragments.
pub fn collect_fragments(
    doc: &Document,
    page_id: ObjectId,
    fallback_page_height: f32,
) -> Vec<TextFragment> {
    let Ok(data) = doc.get_page_content(page_id) else {
        return Vec::new();
    };
    let Ok(content) = Content::decode(&data) else {
        return Vec::new();
    };

    let page_top = page_top(doc, page_id).unwrap_or(fallback_page_height);

    let mut fragments = Vec::new();
    let mut cursor = (0.0f32, 0.0f32);
    let mut line_start = (0.0f32, 0.0f32);
    let mut leading = 0.0f32;

    for op in &content.operations {
        match op.operator.as_str() {
            "BT" => {
                cursor = (0.0, 0.0);
                line_start = (0.0, 0.0);
            }
            "Tm" => {
                if let (Some(e), Some(f)) =
                    (number(op.operands.get(4)), number(op.operands.get(5)))
                {
                    cursor = (e, f);
                    line_start = cursor;
                }
            }
            "Td" | "TD" => {
                if let (Some(tx), Some(ty)) =
                    (number(op.operands.first()), number(op.operands.get(1)))
                {
                    if op.operator == "TD" {
                        leading = -ty;
                    }
                    line_start = (line_start.0 + tx, line_start.1 + ty);
                    cursor = line_start;
                }
            }
            "TL" => {
                if let Some(l) = number(op.operands.first()) {
                    leading = l;
                }
            }
            "T*" => {
                line_start.1 -= leading;
                cursor = line_start;
            }
            "Tj" => push_fragment(&mut fragments, op.operands.first(), cursor, page_top),
            "'" => {
                line_start.1 -= leading;
                cursor = line_start;
                push_fragment(&mut fragments, op.operands.first(), cursor, page_top);
            }
            "\"" => {
                line_start.1 -= leading;
                cursor = line_start;
                push_fragment(&mut fragments, op.operands.get(2), cursor, page_top);
            }
            "TJ" => {
                if let Some(Object::Array(parts)) = op.operands.first() {
                    let text: String = parts.iter().filter_map(decode_text_operand).collect();
                    if !text.trim().is_empty() {
                        fragments.push(TextFragment {
                            text,
                            x: cursor.0,
                            y: page_top - cursor.1,
                        });
                    }
                }
            }
            _ => {}
        }
    }

    trace!("collected {} text fragments from page content", fragments.len());
    fragments
}

fn push_fragment(
    fragments: &mut Vec<TextFragment>,
    operand: Option<&Object>,
    cursor: (f32, f32),
    page_top: f32,
) {
    if let Some(text) = operand.and_then(decode_text_operand) {
        if !text.trim().is_empty() {
            fragments.push(TextFragment {
                text,
                x: cursor.0,
                y: page_top - cursor.1,
            });
        }
    }
}

fn number(obj: Option<&Object>) -> Option<f32> {
    match obj? {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

fn decode_text_operand(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(decode_string_bytes(bytes)),
        _ => None,
    }
}

fn decode_string_bytes(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

/// Top y coordinate of the page MediaBox, walking up the page tree.
fn page_top(doc: &Document, page_id: ObjectId) -> Option<f32> {
    let mut node_id = page_id;
    loop {
        let dict = doc.get_object(node_id).ok()?.as_dict().ok()?;

        if let Ok(media_box) = dict.get(b"MediaBox") {
            if let Ok((_, Object::Array(values))) = doc.dereference(media_box) {
                if values.len() == 4 {
                    return number(values.get(3));
                }
            }
        }

        match dict.get(b"Parent") {
            Ok(Object::Reference(parent)) => node_id = *parent,
            _ => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fragment(text: &str, x: f32, y: f32) -> TextFragment {
        TextFragment {
            text: text.to_string(),
            x,
            y,
        }
    }

    #[test]
    fn test_region_contains_edges() {
        let region = Region::new(10.0, 10.0, 20.0, 20.0);
        assert!(region.contains(10.0, 10.0));
        assert!(region.contains(20.0, 20.0));
        assert!(!region.contains(9.9, 15.0));
        assert!(!region.contains(15.0, 20.1));
    }

    #[test]
    fn test_extract_region_orders_and_groups_lines() {
        let fragments = vec![
            fragment("72766", 620.0, 55.0),
            fragment("E", 605.0, 55.5),
            fragment("CBBE1", 610.0, 45.0),
            fragment("elsewhere", 100.0, 400.0),
        ];
        let region = Region::new(600.0, 40.0, 680.0, 60.0);

        let text = extract_region(&fragments, &region, 4.0);
        assert_eq!(text, "CBBE1\nE 72766");
    }

    #[test]
    fn test_extract_region_empty_is_silent() {
        let region = Region::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(extract_region(&[], &region, 4.0), "");
    }

    #[test]
    fn test_default_region_map_has_seven_boxes() {
        let map = RegionMap::default();
        assert_eq!(map.boxes().len(), 7);

        let hints = map.extract_hints(&[]);
        assert_eq!(hints.len(), 7);
        assert!(hints.iter().all(|h| h.text.is_empty()));
    }

    #[test]
    fn test_decode_utf16be_string() {
        let bytes = [0xFE, 0xFF, 0x00, 0x41, 0x00, 0x42];
        assert_eq!(decode_string_bytes(&bytes), "AB");
    }
}
