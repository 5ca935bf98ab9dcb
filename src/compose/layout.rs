//! Page layout primitives shared by the document composers.
//!
//! Positions are millimetres from the bottom-left corner of an A4 portrait
//! page. Tables are drawn as a bordered grid whose box height is derived
//! from the row count, so an empty table still renders as a valid box.

use printpdf::{Color, IndirectFontRef, Line, Mm, PdfLayerReference, Point, Rgb};

/// A4 portrait width in millimetres.
pub const PAGE_WIDTH: f64 = 210.0;
/// A4 portrait height in millimetres.
pub const PAGE_HEIGHT: f64 = 297.0;
/// Default page margin in millimetres.
pub const MARGIN: f64 = 20.0;

/// Approximate advance width of builtin Helvetica, as a fraction of the
/// font size. Good enough for centring headings without font metrics.
const GLYPH_WIDTH_EM: f64 = 0.5;
/// Point-to-millimetre conversion.
const PT_TO_MM: f64 = 0.352_778;

/// Geometry of a bordered table.
#[derive(Debug, Clone)]
pub struct TableSpec {
    /// Left edge of the table
    pub x: f64,
    /// Top edge of the table
    pub top_y: f64,
    /// Column widths, left to right
    pub col_widths: Vec<f64>,
    /// Height of every row, header rows included
    pub row_height: f64,
}

impl TableSpec {
    /// Total table width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.col_widths.iter().sum()
    }

    /// Box height for the given body row count:
    /// `row_height * (rows + header_rows)`.
    #[must_use]
    pub fn height(&self, row_count: usize, header_rows: usize) -> f64 {
        self.row_height * (row_count + header_rows) as f64
    }
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

/// Draws a straight line segment.
pub fn draw_line(layer: &PdfLayerReference, x1: f64, y1: f64, x2: f64, y2: f64) {
    let line = Line {
        points: vec![
            (Point::new(Mm(x1 as f32), Mm(y1 as f32)), false),
            (Point::new(Mm(x2 as f32), Mm(y2 as f32)), false),
        ],
        is_closed: false,
    };
    layer.set_outline_color(black());
    layer.set_outline_thickness(0.4);
    layer.add_line(line);
}

/// Draws a rectangle outline with `(x, y)` at the bottom-left corner.
pub fn draw_rect(layer: &PdfLayerReference, x: f64, y: f64, width: f64, height: f64) {
    let line = Line {
        points: vec![
            (Point::new(Mm(x as f32), Mm(y as f32)), false),
            (Point::new(Mm((x + width) as f32), Mm(y as f32)), false),
            (Point::new(Mm((x + width) as f32), Mm((y + height) as f32)), false),
            (Point::new(Mm(x as f32), Mm((y + height) as f32)), false),
        ],
        is_closed: true,
    };
    layer.set_outline_color(black());
    layer.set_outline_thickness(0.4);
    layer.add_line(line);
}

/// Writes a single line of text at a baseline position.
pub fn text_at(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    size: f64,
    x: f64,
    y: f64,
    text: &str,
) {
    layer.set_fill_color(black());
    layer.use_text(text, size as f32, Mm(x as f32), Mm(y as f32), font);
}

/// Writes a line of text horizontally centred on the page.
pub fn text_centered(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    size: f64,
    y: f64,
    text: &str,
) {
    let width = approx_text_width(text, size);
    let x = ((PAGE_WIDTH - width) / 2.0).max(MARGIN);
    text_at(layer, font, size, x, y, text);
}

/// Writes consecutive lines downward from `top_y`, returning the y of the
/// next free baseline.
pub fn text_lines(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    size: f64,
    x: f64,
    top_y: f64,
    line_height: f64,
    lines: &[String],
) -> f64 {
    let mut y = top_y;
    for line in lines {
        text_at(layer, font, size, x, y, line);
        y -= line_height;
    }
    y
}

/// Approximate rendered width of a line, in millimetres.
#[must_use]
pub fn approx_text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * GLYPH_WIDTH_EM * PT_TO_MM
}

/// Greedy word wrap to a maximum line width in millimetres.
#[must_use]
pub fn wrap_text(text: &str, size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if approx_text_width(&candidate, size) > max_width && !current.is_empty() {
            lines.push(current);
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Draws a bordered table: outer box, row separators, column separators,
/// an optional header row, and cell text. Returns the y coordinate of the
/// table's bottom edge.
pub fn draw_table(
    layer: &PdfLayerReference,
    body_font: &IndirectFontRef,
    header_font: &IndirectFontRef,
    spec: &TableSpec,
    header: Option<&[String]>,
    rows: &[Vec<String>],
    font_size: f64,
) -> f64 {
    let header_rows = usize::from(header.is_some());
    let height = spec.height(rows.len(), header_rows);
    let bottom = spec.top_y - height;
    let width = spec.width();

    draw_rect(layer, spec.x, bottom, width, height);

    // Column separators span the full box.
    let mut col_x = spec.x;
    for col_width in &spec.col_widths[..spec.col_widths.len().saturating_sub(1)] {
        col_x += col_width;
        draw_line(layer, col_x, bottom, col_x, spec.top_y);
    }

    // Row separators and cell text, top to bottom.
    let text_inset = 2.0;
    let baseline_offset = spec.row_height - font_size * PT_TO_MM - 1.0;
    let mut row_top = spec.top_y;

    if let Some(cells) = header {
        draw_cells(layer, header_font, spec, row_top, cells, font_size, text_inset, baseline_offset);
        row_top -= spec.row_height;
        draw_line(layer, spec.x, row_top, spec.x + width, row_top);
    }

    for (index, cells) in rows.iter().enumerate() {
        draw_cells(layer, body_font, spec, row_top, cells, font_size, text_inset, baseline_offset);
        row_top -= spec.row_height;
        if index + 1 < rows.len() {
            draw_line(layer, spec.x, row_top, spec.x + width, row_top);
        }
    }

    bottom
}

#[allow(clippy::too_many_arguments)]
fn draw_cells(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    spec: &TableSpec,
    row_top: f64,
    cells: &[String],
    font_size: f64,
    text_inset: f64,
    baseline_offset: f64,
) {
    let mut cell_x = spec.x;
    for (cell, col_width) in cells.iter().zip(&spec.col_widths) {
        text_at(
            layer,
            font,
            font_size,
            cell_x + text_inset,
            row_top - spec.row_height + baseline_offset,
            cell,
        );
        cell_x += col_width;
    }
}
