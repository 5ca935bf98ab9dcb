//! Note-order composition.
//!
//! The note-order is the administrative request a coordinator submits to
//! the convenor committee: page one carries the request narrative, the
//! programme details, the proposed registration fees, and the signatory
//! block; page two carries the tentative budget.

use crate::{
    compose::layout::{
        self, MARGIN, PAGE_HEIGHT, PAGE_WIDTH, TableSpec, draw_line, text_at, text_centered,
        text_lines, wrap_text,
    },
    compose::ComposedDocument,
    core::format::{format_date_range, format_rupees, join_listing},
    errors::{Error, Result},
    models::Programme,
};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

const BODY_SIZE: f64 = 11.0;
const HEADING_SIZE: f64 = 14.0;
const ROW_HEIGHT: f64 = 8.0;

/// Composes the two-page note-order request for a programme.
///
/// # Errors
/// Returns [`Error::Validation`] when the programme title is blank, and
/// propagates PDF backend failures.
pub fn note_order(programme: &Programme) -> Result<ComposedDocument> {
    if programme.title.trim().is_empty() {
        return Err(Error::Validation {
            message: "Programme title is required for a note-order".to_string(),
        });
    }

    let (doc, page1, layer1) = PdfDocument::new(
        format!("Note Order - {}", programme.title),
        Mm(PAGE_WIDTH as f32),
        Mm(PAGE_HEIGHT as f32),
        "Request",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(crate::compose::pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(crate::compose::pdf_error)?;

    let layer = doc.get_page(page1).get_layer(layer1);
    render_request_page(&layer, &regular, &bold, programme);

    let (page2, layer2) = doc.add_page(Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "Budget");
    let layer = doc.get_page(page2).get_layer(layer2);
    render_budget_page(&layer, &regular, &bold, programme);

    let bytes = doc.save_to_bytes().map_err(crate::compose::pdf_error)?;
    Ok(ComposedDocument {
        bytes,
        media_type: "application/pdf".to_string(),
    })
}

fn render_request_page(
    layer: &PdfLayerReference,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
    programme: &Programme,
) {
    let body_width = PAGE_WIDTH - 2.0 * MARGIN;

    // Header block
    text_centered(layer, bold, HEADING_SIZE, PAGE_HEIGHT - 25.0, "NOTE ORDER");
    text_centered(layer, bold, 12.0, PAGE_HEIGHT - 33.0, &programme.title);

    // Subject line
    let subject = format!(
        "Sub: Permission to conduct \"{}\" - reg.",
        programme.title
    );
    let mut y = PAGE_HEIGHT - 48.0;
    y = text_lines(
        layer,
        bold,
        BODY_SIZE,
        MARGIN,
        y,
        6.0,
        &wrap_text(&subject, BODY_SIZE, body_width),
    );

    // Narrative paragraph
    let narrative = format!(
        "The Department proposes to organise a {}-day {} training programme titled \
         \"{}\" from {}. The programme will be coordinated by {}. It is requested that \
         permission may kindly be accorded to conduct the programme and to collect the \
         registration fees detailed below.",
        programme.duration,
        programme.mode.to_lowercase(),
        programme.title,
        format_date_range(programme.start_date, programme.end_date),
        programme.coordinator_names(),
    );
    y -= 4.0;
    y = text_lines(
        layer,
        regular,
        BODY_SIZE,
        MARGIN,
        y,
        6.0,
        &wrap_text(&narrative, BODY_SIZE, body_width),
    );

    // Details table: fixed-width label column, no border
    let details = [
        ("Mode", programme.mode.clone()),
        ("Duration", format!("{} days", programme.duration)),
        (
            "Target Audience",
            join_listing(&programme.target_audience),
        ),
        (
            "Resource Persons",
            join_listing(&programme.resource_persons),
        ),
    ];
    y -= 6.0;
    for (label, value) in &details {
        text_at(layer, bold, BODY_SIZE, MARGIN, y, label);
        text_at(layer, regular, BODY_SIZE, MARGIN + 50.0, y, &format!(": {value}"));
        y -= 7.0;
    }

    // Registration fee table, one row per income category
    let fee_rows: Vec<Vec<String>> = programme
        .budget
        .income
        .iter()
        .map(|line| {
            vec![
                line.category.clone(),
                format!(
                    "Rs. {}/- + {}% GST",
                    plain_number(line.per_participant_amount),
                    plain_number(line.gst_percentage)
                ),
            ]
        })
        .collect();
    let fee_table = TableSpec {
        x: MARGIN,
        top_y: y - 4.0,
        col_widths: vec![95.0, 75.0],
        row_height: ROW_HEIGHT,
    };
    let header = vec!["Category".to_string(), "Registration Fee".to_string()];
    let table_bottom = layout::draw_table(
        layer,
        regular,
        bold,
        &fee_table,
        Some(header.as_slice()),
        &fee_rows,
        BODY_SIZE,
    );

    render_signatories(layer, regular, bold, programme, table_bottom - 25.0);
}

fn render_signatories(
    layer: &PdfLayerReference,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
    programme: &Programme,
    y: f64,
) {
    let labels = [
        "CO-ORDINATOR(S)",
        "HOD",
        "DIRECTOR-CCS",
        "DIRECTOR-CSRC",
        "REGISTRAR",
    ];
    let col_width = (PAGE_WIDTH - 2.0 * MARGIN) / labels.len() as f64;
    for (index, label) in labels.iter().enumerate() {
        text_at(layer, bold, 8.0, MARGIN + col_width * index as f64, y, label);
    }

    // One name row per coordinator under the first column
    let mut name_y = y - 7.0;
    for coordinator in &programme.coordinators {
        text_at(layer, regular, 9.0, MARGIN, name_y, &coordinator.name);
        name_y -= 5.5;
    }
}

fn render_budget_page(
    layer: &PdfLayerReference,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
    programme: &Programme,
) {
    text_centered(layer, bold, HEADING_SIZE, PAGE_HEIGHT - 25.0, "TENTATIVE BUDGET");

    // Income listing
    let mut y = PAGE_HEIGHT - 40.0;
    text_at(layer, bold, BODY_SIZE, MARGIN, y, "Income");
    y -= 8.0;
    let mut income_total = 0.0;
    for line in &programme.budget.income {
        let total = line.projected_total();
        income_total += total;
        let text = format!(
            "{} = {} x Rs. {} + {}% GST = Rs. {:.2}",
            line.category,
            line.expected_participants,
            plain_number(line.per_participant_amount),
            plain_number(line.gst_percentage),
            total,
        );
        text_at(layer, regular, BODY_SIZE, MARGIN + 4.0, y, &text);
        y -= 7.0;
    }
    text_at(
        layer,
        bold,
        BODY_SIZE,
        MARGIN + 4.0,
        y,
        &format!("Total Income: {}", format_rupees(income_total)),
    );
    y -= 12.0;

    // Expenditure table with the two synthetic rows appended
    text_at(layer, bold, BODY_SIZE, MARGIN, y, "Expenditure");
    y -= 4.0;
    let mut rows: Vec<Vec<String>> = programme
        .budget
        .expenses
        .iter()
        .map(|line| vec![line.category.clone(), format_rupees(line.amount)])
        .collect();
    rows.push(vec![
        "University Overhead (30%)".to_string(),
        format_rupees(programme.budget.university_overhead),
    ]);
    rows.push(vec![
        "Total Expenditure".to_string(),
        format_rupees(programme.budget.total_expenditure),
    ]);

    let table = TableSpec {
        x: MARGIN,
        top_y: y,
        col_widths: vec![110.0, 60.0],
        row_height: ROW_HEIGHT,
    };
    let header = vec!["Particulars".to_string(), "Amount".to_string()];
    let bottom = layout::draw_table(
        layer,
        regular,
        bold,
        &table,
        Some(header.as_slice()),
        &rows,
        BODY_SIZE,
    );

    draw_line(layer, MARGIN, bottom - 2.0, MARGIN + table.width(), bottom - 2.0);
}

/// Renders a number without trailing zeros, matching how fee figures are
/// quoted ("Rs. 500/-", "18% GST").
fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
