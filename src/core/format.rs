//! Shared formatting helpers for document text.
//!
//! Money renders the way the portal's documents already print it: `Rs.`
//! prefixes on note-orders and budget sheets, the rupee sign on claim
//! receipts, and `dd.mm.yyyy` dates throughout.

use chrono::NaiveDate;

/// Rounds to two decimals (paise precision).
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats an amount for note-order and budget rows, e.g. `Rs. 4530.00`.
#[must_use]
pub fn format_rupees(amount: f64) -> String {
    format!("Rs. {amount:.2}")
}

/// Formats an amount for claim receipts, e.g. `₹ 4530.00`.
#[must_use]
pub fn format_inr(amount: f64) -> String {
    format!("₹ {amount:.2}")
}

/// Formats a date as `dd.mm.yyyy`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Formats a date range, collapsing single-day programmes to one date.
#[must_use]
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    if start == end {
        format_date(start)
    } else {
        format!("{} to {}", format_date(start), format_date(end))
    }
}

/// Joins list entries for label:value rows, with a dash for empty lists.
#[must_use]
pub fn join_listing(entries: &[String]) -> String {
    if entries.is_empty() {
        "-".to_string()
    } else {
        entries.join(", ")
    }
}
