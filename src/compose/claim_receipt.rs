//! Claim-bill receipt composition.
//!
//! The receipt is the statement an approved claim is settled against:
//! coordinator identification, the itemized expense table, and the
//! certification paragraph with the total spelled out in words. Rows whose
//! amount does not parse are rendered with the literal submitted text and
//! skipped from the total; the skip is logged, never an error - the audit
//! trail prioritizes producing a document over failing the request.

use crate::{
    compose::layout::{
        MARGIN, PAGE_HEIGHT, PAGE_WIDTH, TableSpec, draw_table, text_at, text_centered, text_lines,
        wrap_text,
    },
    compose::ComposedDocument,
    core::{
        format::{format_date_range, format_inr, join_listing},
        words::amount_to_words,
    },
    errors::{Error, Result},
    models::Programme,
};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use tracing::warn;

const BODY_SIZE: f64 = 11.0;
const ROW_HEIGHT: f64 = 8.0;

/// Composes the claim-bill statement for a programme.
///
/// # Errors
/// Returns [`Error::ClaimBillNotFound`] when the programme has no claim
/// bill attached, and propagates PDF backend failures.
pub fn claim_receipt(programme: &Programme) -> Result<ComposedDocument> {
    let claim = programme
        .claim_bill
        .as_ref()
        .ok_or_else(|| Error::ClaimBillNotFound {
            programme: programme.title.clone(),
        })?;

    let (doc, page1, layer1) = PdfDocument::new(
        format!("Claim Bill - {}", programme.title),
        Mm(PAGE_WIDTH as f32),
        Mm(PAGE_HEIGHT as f32),
        "Statement",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(crate::compose::pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(crate::compose::pdf_error)?;
    let layer = doc.get_page(page1).get_layer(layer1);

    text_centered(&layer, &bold, 14.0, PAGE_HEIGHT - 25.0, "CLAIM BILL");
    text_centered(&layer, &bold, 12.0, PAGE_HEIGHT - 33.0, &programme.title);

    // Coordinator identification block
    let mut y = PAGE_HEIGHT - 48.0;
    for coordinator in &programme.coordinators {
        let line = format!(
            "{}, {}, {}",
            coordinator.name, coordinator.designation, coordinator.department
        );
        text_at(&layer, &regular, BODY_SIZE, MARGIN, y, &line);
        y -= 6.5;
    }

    // Expense table; the running total covers only parsable amounts.
    let (mut rows, total) = expense_rows(claim);
    rows.push(vec![String::new(), "Total".to_string(), format_inr(total)]);

    let table = TableSpec {
        x: MARGIN,
        top_y: y - 4.0,
        col_widths: vec![18.0, 102.0, 50.0],
        row_height: ROW_HEIGHT,
    };
    let header = vec![
        "S.No.".to_string(),
        "Particulars".to_string(),
        "Amount".to_string(),
    ];
    let table_bottom = draw_table(
        &layer,
        &regular,
        &bold,
        &table,
        Some(header.as_slice()),
        &rows,
        BODY_SIZE,
    );

    // Certification paragraph
    let categories: Vec<String> = claim
        .expenses
        .iter()
        .map(|item| item.category.clone())
        .collect();
    let certification = format!(
        "Certified that an amount of {} (Rupees {} Only) was incurred towards {} in \
         connection with the programme conducted at {} during {}.",
        format_inr(total),
        amount_to_words(total),
        join_listing(&categories),
        programme.venue,
        format_date_range(programme.start_date, programme.end_date),
    );
    let mut y = table_bottom - 12.0;
    y = text_lines(
        &layer,
        &regular,
        BODY_SIZE,
        MARGIN,
        y,
        6.0,
        &wrap_text(&certification, BODY_SIZE, PAGE_WIDTH - 2.0 * MARGIN),
    );

    // Pass-order and signature lines
    y -= 10.0;
    text_at(
        &layer,
        &regular,
        BODY_SIZE,
        MARGIN,
        y,
        "Bill passed for Rs. ________________",
    );
    y -= 18.0;
    text_at(&layer, &regular, BODY_SIZE, MARGIN, y, "____________________");
    text_at(&layer, &regular, BODY_SIZE, PAGE_WIDTH - MARGIN - 45.0, y, "____________________");
    y -= 6.0;
    text_at(&layer, &regular, 9.0, MARGIN, y, "Co-ordinator");
    text_at(&layer, &regular, 9.0, PAGE_WIDTH - MARGIN - 45.0, y, "Head of the Department");

    let bytes = doc.save_to_bytes().map_err(crate::compose::pdf_error)?;
    Ok(ComposedDocument {
        bytes,
        media_type: "application/pdf".to_string(),
    })
}

/// Builds the serial/category/amount rows and accumulates the running
/// total over numerically valid amounts. Unparsable amounts keep their
/// literal text in the row and are skipped from the sum with a log line.
fn expense_rows(claim: &crate::models::ClaimBill) -> (Vec<Vec<String>>, f64) {
    let mut total = 0.0;
    let mut rows = Vec::with_capacity(claim.expenses.len() + 1);
    for (index, item) in claim.expenses.iter().enumerate() {
        let amount_cell = match &item.amount {
            Some(amount) => match amount.value() {
                Some(value) => {
                    total += value;
                    format_inr(value)
                }
                None => {
                    warn!(
                        category = %item.category,
                        raw = %amount,
                        "skipping unparsable amount in receipt total"
                    );
                    amount.to_string()
                }
            },
            None => {
                warn!(
                    category = %item.category,
                    "skipping missing amount in receipt total"
                );
                "-".to_string()
            }
        };
        rows.push(vec![
            (index + 1).to_string(),
            item.category.clone(),
            amount_cell,
        ]);
    }
    (rows, total)
}
