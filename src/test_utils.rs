//! Shared test utilities for `progdesk`.
//!
//! Sample-data builders with sensible defaults, mirrored across the
//! module tests so scenarios stay short.

use crate::models::{
    Amount, BudgetBreakdown, ClaimBill, Coordinator, ExpenseItem, ExpenseLine, IncomeLine,
    ItemStatus, Programme,
};
use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer tracing subscriber so `cargo test` output stays
/// attached to the right test. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// A four-day offline programme with two coordinators, one income
/// category, and two planned expense rows. No claim bill attached.
pub fn sample_programme() -> Programme {
    Programme {
        title: "Applied Machine Learning for Engineers".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 1, 2).expect("valid date"),
        end_date: NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date"),
        venue: "Seminar Hall, Main Block".to_string(),
        mode: "Offline".to_string(),
        duration: 4,
        coordinators: vec![
            Coordinator {
                name: "Dr. S. Meenakshi".to_string(),
                designation: "Associate Professor".to_string(),
                department: "Computer Science".to_string(),
            },
            Coordinator {
                name: "Dr. K. Prasad".to_string(),
                designation: "Assistant Professor".to_string(),
                department: "Computer Science".to_string(),
            },
        ],
        target_audience: vec!["Faculty".to_string(), "Research scholars".to_string()],
        resource_persons: vec!["Prof. A. Iyer".to_string()],
        budget: BudgetBreakdown {
            income: vec![IncomeLine {
                category: "Faculty".to_string(),
                expected_participants: 40,
                per_participant_amount: 500.0,
                gst_percentage: 18.0,
            }],
            expenses: vec![
                ExpenseLine {
                    category: "Honorarium to resource persons".to_string(),
                    amount: 6000.0,
                },
                ExpenseLine {
                    category: "Refreshments".to_string(),
                    amount: 4000.0,
                },
            ],
            university_overhead: 0.0,
            total_expenditure: 0.0,
        }
        .with_computed_totals(),
        claim_bill: None,
    }
}

/// A claim with one approved, one pending, and one rejected item.
pub fn sample_claim() -> ClaimBill {
    let mut tea = ExpenseItem::submitted(
        "Tea and snacks".to_string(),
        Some(Amount::Number(2500.0)),
        Some(Amount::Number(2400.0)),
    );
    tea.item_status = ItemStatus::Approved;
    tea.approved_amount = Some(Amount::Number(2400.0));

    let stationery = ExpenseItem::submitted(
        "Stationery".to_string(),
        Some(Amount::Number(345.0)),
        None,
    );

    let mut van = ExpenseItem::submitted(
        "Van hire".to_string(),
        Some(Amount::Number(400.0)),
        None,
    );
    van.item_status = ItemStatus::Rejected;
    van.rejection_reason = Some("No receipts attached".to_string());

    ClaimBill {
        expenses: vec![tea, stationery, van],
        ..ClaimBill::default()
    }
}
