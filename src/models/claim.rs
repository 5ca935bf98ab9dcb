//! Claim bill model - itemized expense reimbursement requests.
//!
//! A claim bill belongs to one programme and holds the ordered list of
//! expense items a coordinator submitted for reimbursement, together with
//! the claim-level totals maintained by [`crate::core::reconcile`]. Field
//! names serialize in camelCase to match the wire shape the portal's
//! clients already produce.

use crate::{
    errors::{Error, Result},
    models::amount::{Amount, sanitized},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-item approval state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Submitted, not yet reviewed
    #[default]
    Pending,
    /// Accepted for reimbursement
    Approved,
    /// Refused; `rejection_reason` carries the reviewer's note
    Rejected,
}

/// The outcome a reviewer records for an expense item.
#[derive(Debug, Clone)]
pub enum ReviewVerdict {
    /// Approve the item, optionally adjusting the approved figure
    Approve {
        /// Reviewer-set amount; falls back to the claimed figure when `None`
        approved_amount: Option<f64>,
    },
    /// Reject the item with a reason
    Reject {
        /// Why the item was refused
        reason: String,
    },
}

/// One line of a claim bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseItem {
    /// Expense category label (e.g. "Refreshments", "Printing")
    pub category: String,
    /// Planned figure from the programme budget
    #[serde(default)]
    pub budget_amount: Option<Amount>,
    /// Figure the coordinator actually spent
    #[serde(default)]
    pub actual_amount: Option<Amount>,
    /// Figure sanctioned on review
    #[serde(default)]
    pub approved_amount: Option<Amount>,
    /// Display amount, kept in sync with the authoritative value
    #[serde(default)]
    pub amount: Option<Amount>,
    /// The figure originally claimed at submission time. Captured once and
    /// never rewritten by reconciliation, so the audit trail of what was
    /// requested survives approval.
    #[serde(default)]
    pub submitted_amount: Option<Amount>,
    /// Approval state
    #[serde(default)]
    pub item_status: ItemStatus,
    /// Reviewer's note, present when the item is rejected
    #[serde(default)]
    pub rejection_reason: Option<String>,
    /// Who reviewed the item
    #[serde(default)]
    pub reviewed_by: Option<String>,
    /// When the item was last reviewed
    #[serde(default)]
    pub review_date: Option<DateTime<Utc>>,
    /// Whether a receipt document has been composed for this item
    #[serde(default)]
    pub receipt_generated: bool,
    /// Receipt serial, set once on first issue
    #[serde(default)]
    pub receipt_number: Option<String>,
}

impl ExpenseItem {
    /// Creates a pending item from a submitted category and figures.
    #[must_use]
    pub fn submitted(
        category: String,
        budget_amount: Option<Amount>,
        actual_amount: Option<Amount>,
    ) -> Self {
        let submitted_amount = actual_amount.clone().or_else(|| budget_amount.clone());
        Self {
            category,
            budget_amount,
            actual_amount,
            approved_amount: None,
            amount: None,
            submitted_amount,
            item_status: ItemStatus::Pending,
            rejection_reason: None,
            reviewed_by: None,
            review_date: None,
            receipt_generated: false,
            receipt_number: None,
        }
    }

    /// The single authoritative amount for this item, derived from its
    /// status. All display and total computations go through this accessor
    /// rather than re-reading the four raw fields.
    ///
    /// - approved: `approved ?? actual ?? budget ?? 0`
    /// - rejected: `0`
    /// - pending: `actual ?? budget ?? 0`
    ///
    /// A field that is present but unusable (unparsable text, negative,
    /// non-finite) counts as `0` rather than falling through the chain.
    #[must_use]
    pub fn effective_amount(&self) -> f64 {
        match self.item_status {
            ItemStatus::Approved => sanitized(self.approved_amount.as_ref())
                .or_else(|| sanitized(self.actual_amount.as_ref()))
                .or_else(|| sanitized(self.budget_amount.as_ref()))
                .unwrap_or(0.0),
            ItemStatus::Rejected => 0.0,
            ItemStatus::Pending => sanitized(self.actual_amount.as_ref())
                .or_else(|| sanitized(self.budget_amount.as_ref()))
                .unwrap_or(0.0),
        }
    }

    /// Records a review outcome on this item.
    ///
    /// Legal from any current status; re-review overwrites the previous
    /// verdict. The caller owns running
    /// [`crate::core::reconcile::reconcile`] on the claim afterwards - this
    /// method only records the verdict.
    pub fn review(&mut self, verdict: &ReviewVerdict, reviewer: &str, at: DateTime<Utc>) {
        match verdict {
            ReviewVerdict::Approve { approved_amount } => {
                self.item_status = ItemStatus::Approved;
                if let Some(value) = approved_amount {
                    self.approved_amount = Some(Amount::Number(*value));
                }
                self.rejection_reason = None;
            }
            ReviewVerdict::Reject { reason } => {
                self.item_status = ItemStatus::Rejected;
                self.rejection_reason = Some(reason.clone());
            }
        }
        self.reviewed_by = Some(reviewer.to_string());
        self.review_date = Some(at);
    }
}

/// A coordinator's expense reimbursement request for one programme.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimBill {
    /// Expense items in submission order. Order is significant: it is the
    /// display and receipt-numbering order.
    #[serde(default)]
    pub expenses: Vec<ExpenseItem>,
    /// Sum of approved budget figures
    #[serde(default)]
    pub total_budget_amount: f64,
    /// Sum of approved expenditure figures
    #[serde(default)]
    pub total_expenditure: f64,
    /// Sum of sanctioned figures
    #[serde(default)]
    pub total_approved_amount: f64,
}

/// Shape of one expense line in a claim submission payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmittedExpense {
    category: String,
    #[serde(default)]
    budget_amount: Option<Amount>,
    #[serde(default)]
    actual_amount: Option<Amount>,
}

/// Shape of a claim submission payload.
#[derive(Debug, Deserialize)]
struct ClaimSubmission {
    expenses: Vec<SubmittedExpense>,
}

impl ClaimBill {
    /// Builds a claim bill from a structured submission payload.
    ///
    /// The portal accepts nested submission objects directly; malformed
    /// structure fails here with a validation error instead of at some
    /// later parse site. Every item starts pending with its originally
    /// claimed figure captured in `submitted_amount`.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] when the payload is not valid JSON of
    /// the expected shape or an item has an empty category.
    pub fn from_submission_json(payload: &str) -> Result<Self> {
        let submission: ClaimSubmission =
            serde_json::from_str(payload).map_err(|e| Error::Validation {
                message: format!("Malformed claim submission: {e}"),
            })?;

        let mut expenses = Vec::with_capacity(submission.expenses.len());
        for submitted in submission.expenses {
            let category = submitted.category.trim().to_string();
            if category.is_empty() {
                return Err(Error::Validation {
                    message: "Expense category cannot be empty".to_string(),
                });
            }
            expenses.push(ExpenseItem::submitted(
                category,
                submitted.budget_amount,
                submitted.actual_amount,
            ));
        }

        Ok(Self {
            expenses,
            ..Self::default()
        })
    }

    /// Assigns receipt serials to approved items that do not have one yet.
    ///
    /// Serials follow insertion order (`RCP-001`, `RCP-002`, ...) and are
    /// set once: an item that already carries a number keeps it. Returns
    /// how many items were newly numbered.
    pub fn issue_receipt_numbers(&mut self) -> usize {
        let mut issued = 0;
        for (position, item) in self.expenses.iter_mut().enumerate() {
            if item.item_status == ItemStatus::Approved && item.receipt_number.is_none() {
                item.receipt_number = Some(format!("RCP-{:03}", position + 1));
                item.receipt_generated = true;
                issued += 1;
            }
        }
        issued
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    fn pending_item(category: &str) -> ExpenseItem {
        ExpenseItem::submitted(category.to_string(), None, Some(Amount::Number(100.0)))
    }

    #[test]
    fn test_submitted_item_captures_claimed_figure() {
        let item = ExpenseItem::submitted(
            "Tea".to_string(),
            Some(Amount::Number(400.0)),
            Some(Amount::Number(350.0)),
        );
        assert_eq!(item.submitted_amount, Some(Amount::Number(350.0)));
        assert_eq!(item.item_status, ItemStatus::Pending);

        let budget_only = ExpenseItem::submitted("Food".to_string(), Some(Amount::Number(400.0)), None);
        assert_eq!(budget_only.submitted_amount, Some(Amount::Number(400.0)));
    }

    #[test]
    fn test_effective_amount_by_status() {
        let mut item = pending_item("Tea");
        assert_eq!(item.effective_amount(), 100.0);

        item.item_status = ItemStatus::Approved;
        item.approved_amount = Some(Amount::Number(80.0));
        assert_eq!(item.effective_amount(), 80.0);

        item.item_status = ItemStatus::Rejected;
        assert_eq!(item.effective_amount(), 0.0);
    }

    #[test]
    fn test_effective_amount_fallback_chain() {
        let mut item = ExpenseItem::submitted(
            "Stationery".to_string(),
            Some(Amount::Number(345.0)),
            None,
        );
        assert_eq!(item.effective_amount(), 345.0);

        // Approved without a sanctioned figure falls back to claimed figures.
        item.item_status = ItemStatus::Approved;
        assert_eq!(item.effective_amount(), 345.0);
    }

    #[test]
    fn test_effective_amount_coerces_unusable_field() {
        let mut item = pending_item("Tea");
        item.actual_amount = Some(Amount::Text("abc".to_string()));
        // Present-but-unparsable does not fall through to the budget figure.
        item.budget_amount = Some(Amount::Number(400.0));
        assert_eq!(item.effective_amount(), 0.0);
    }

    #[test]
    fn test_review_approve_then_reject() {
        let mut item = pending_item("Tea");
        let now = Utc::now();

        item.review(
            &ReviewVerdict::Approve {
                approved_amount: Some(90.0),
            },
            "Dr. Rao",
            now,
        );
        assert_eq!(item.item_status, ItemStatus::Approved);
        assert_eq!(item.approved_amount, Some(Amount::Number(90.0)));
        assert_eq!(item.reviewed_by.as_deref(), Some("Dr. Rao"));
        assert!(item.review_date.is_some());

        // Re-review is legal and overwrites the verdict.
        item.review(
            &ReviewVerdict::Reject {
                reason: "No receipts attached".to_string(),
            },
            "Dr. Rao",
            now,
        );
        assert_eq!(item.item_status, ItemStatus::Rejected);
        assert_eq!(
            item.rejection_reason.as_deref(),
            Some("No receipts attached")
        );
    }

    #[test]
    fn test_review_reject_then_approve_clears_reason() {
        let mut item = pending_item("Tea");
        let now = Utc::now();
        item.review(
            &ReviewVerdict::Reject {
                reason: "Duplicate".to_string(),
            },
            "Dr. Rao",
            now,
        );
        item.review(&ReviewVerdict::Approve { approved_amount: None }, "HOD", now);
        assert_eq!(item.item_status, ItemStatus::Approved);
        assert!(item.rejection_reason.is_none());
    }

    #[test]
    fn test_from_submission_json() {
        let payload = r#"{
            "expenses": [
                {"category": "Tea", "budgetAmount": 500, "actualAmount": 450},
                {"category": "Printing", "budgetAmount": "300"}
            ]
        }"#;
        let claim = ClaimBill::from_submission_json(payload).unwrap();
        assert_eq!(claim.expenses.len(), 2);
        assert_eq!(claim.expenses[0].category, "Tea");
        assert_eq!(claim.expenses[0].submitted_amount, Some(Amount::Number(450.0)));
        assert_eq!(
            claim.expenses[1].submitted_amount,
            Some(Amount::Text("300".to_string()))
        );
        assert_eq!(claim.total_approved_amount, 0.0);
    }

    #[test]
    fn test_from_submission_json_malformed() {
        let result = ClaimBill::from_submission_json("{\"expenses\": \"nope\"}");
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));
    }

    #[test]
    fn test_from_submission_json_empty_category() {
        let payload = r#"{"expenses": [{"category": "  "}]}"#;
        let result = ClaimBill::from_submission_json(payload);
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));
    }

    #[test]
    fn test_issue_receipt_numbers_set_once() {
        let mut claim = ClaimBill {
            expenses: vec![pending_item("Tea"), pending_item("Food"), pending_item("Van")],
            ..ClaimBill::default()
        };
        claim.expenses[0].item_status = ItemStatus::Approved;
        claim.expenses[2].item_status = ItemStatus::Approved;

        assert_eq!(claim.issue_receipt_numbers(), 2);
        assert_eq!(claim.expenses[0].receipt_number.as_deref(), Some("RCP-001"));
        assert!(claim.expenses[0].receipt_generated);
        assert!(claim.expenses[1].receipt_number.is_none());
        assert_eq!(claim.expenses[2].receipt_number.as_deref(), Some("RCP-003"));

        // A second pass issues nothing and keeps existing serials.
        claim.expenses[1].item_status = ItemStatus::Approved;
        assert_eq!(claim.issue_receipt_numbers(), 1);
        assert_eq!(claim.expenses[0].receipt_number.as_deref(), Some("RCP-001"));
        assert_eq!(claim.expenses[1].receipt_number.as_deref(), Some("RCP-002"));
    }

    #[test]
    fn test_wire_shape_round_trip() {
        let claim = ClaimBill {
            expenses: vec![pending_item("Tea")],
            total_budget_amount: 0.0,
            total_expenditure: 0.0,
            total_approved_amount: 0.0,
        };
        let json = serde_json::to_string(&claim).unwrap();
        assert!(json.contains("\"itemStatus\":\"pending\""));
        assert!(json.contains("\"totalApprovedAmount\""));
        let back: ClaimBill = serde_json::from_str(&json).unwrap();
        assert_eq!(back, claim);
    }
}
