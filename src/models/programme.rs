//! Programme model - a training programme and its budget breakdown.
//!
//! A programme owns at most one claim bill, attached later by a claim
//! submission. Budget figures here are the planning-time numbers shown on
//! the note-order's tentative budget page; the claim bill carries the
//! post-facto reimbursement figures.

use crate::{core::format::round2, models::claim::ClaimBill};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A programme coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinator {
    /// Full name as it should appear on documents
    pub name: String,
    /// Designation (e.g. "Assistant Professor")
    pub designation: String,
    /// Department the coordinator belongs to
    pub department: String,
}

/// A projected income category on the tentative budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeLine {
    /// Participant category (e.g. "Industry delegates")
    pub category: String,
    /// Expected head count
    pub expected_participants: u32,
    /// Registration fee per participant, before GST
    pub per_participant_amount: f64,
    /// GST rate applied to the fee, in percent
    pub gst_percentage: f64,
}

impl IncomeLine {
    /// Projected income for this category:
    /// `expected * amount * (1 + gst/100)`, rounded to two decimals.
    #[must_use]
    pub fn projected_total(&self) -> f64 {
        let gross = f64::from(self.expected_participants)
            * self.per_participant_amount
            * (1.0 + self.gst_percentage / 100.0);
        round2(gross)
    }
}

/// A planned expenditure row on the tentative budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseLine {
    /// Expenditure head (e.g. "Honorarium to resource persons")
    pub category: String,
    /// Planned amount
    pub amount: f64,
}

/// Planning-time budget for a programme.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBreakdown {
    /// Projected income categories
    #[serde(default)]
    pub income: Vec<IncomeLine>,
    /// Planned expenditure rows
    #[serde(default)]
    pub expenses: Vec<ExpenseLine>,
    /// University overhead charged on the programme
    #[serde(default)]
    pub university_overhead: f64,
    /// Grand total expenditure including overhead
    #[serde(default)]
    pub total_expenditure: f64,
}

/// Overhead rate the university charges on programme expenditure.
pub const UNIVERSITY_OVERHEAD_RATE: f64 = 0.30;

impl BudgetBreakdown {
    /// Sum of the planned expense rows, before overhead.
    #[must_use]
    pub fn expense_total(&self) -> f64 {
        round2(self.expenses.iter().map(|line| line.amount).sum())
    }

    /// Fills `university_overhead` (30% of the expense sum) and
    /// `total_expenditure` from the expense rows.
    #[must_use]
    pub fn with_computed_totals(mut self) -> Self {
        let base = self.expense_total();
        self.university_overhead = round2(base * UNIVERSITY_OVERHEAD_RATE);
        self.total_expenditure = round2(base + self.university_overhead);
        self
    }
}

/// A training programme record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Programme {
    /// Programme title
    pub title: String,
    /// First day of the programme
    pub start_date: NaiveDate,
    /// Last day of the programme
    pub end_date: NaiveDate,
    /// Venue as printed on documents
    pub venue: String,
    /// Delivery mode (e.g. "Offline", "Online", "Hybrid")
    pub mode: String,
    /// Duration in days
    pub duration: u32,
    /// Coordinators, in signature order
    pub coordinators: Vec<Coordinator>,
    /// Intended audience groups
    #[serde(default)]
    pub target_audience: Vec<String>,
    /// Invited resource persons
    #[serde(default)]
    pub resource_persons: Vec<String>,
    /// Planning-time budget
    #[serde(default)]
    pub budget: BudgetBreakdown,
    /// Claim bill, attached once the coordinator submits expenses
    #[serde(default)]
    pub claim_bill: Option<ClaimBill>,
}

impl Programme {
    /// Attaches a claim bill, replacing any previous submission wholesale.
    pub fn attach_claim(&mut self, claim: ClaimBill) {
        self.claim_bill = Some(claim);
    }

    /// Coordinator names joined for narrative text.
    #[must_use]
    pub fn coordinator_names(&self) -> String {
        self.coordinators
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
