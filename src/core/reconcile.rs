//! Claim reconciliation - keeps amount fields consistent with item status.
//!
//! Expense items carry four redundant amount fields for compatibility with
//! the wire shape the portal's clients expect. After every review
//! transition the owning workflow runs [`reconcile`] so that the derived
//! fields and the claim-level totals agree with each item's authoritative
//! status. The transform is pure: it neither persists nor triggers
//! anything, and calling it twice is a no-op on the second pass.

use crate::models::claim::{ClaimBill, ExpenseItem, ItemStatus};
use crate::models::Amount;
use tracing::debug;

/// Recomputes every item's amount fields and the claim totals.
///
/// For each item the authoritative value is derived from its status (see
/// [`ExpenseItem::effective_amount`]); `amount` is always rewritten to it,
/// and approved items additionally have `actual_amount`, `budget_amount`,
/// and `approved_amount` synchronized to the same figure. Status, rejection
/// reason, category, `submitted_amount`, and item order are never touched.
///
/// Present-but-unusable numeric fields (unparsable text, negative,
/// non-finite) are coerced to zero rather than rejected; the portal
/// prioritizes producing a document over failing the request.
#[must_use]
pub fn reconcile(claim: &ClaimBill) -> ClaimBill {
    let mut reconciled = claim.clone();
    let mut approved_total = 0.0;

    for item in &mut reconciled.expenses {
        log_coercions(item);
        let target = item.effective_amount();
        item.amount = Some(Amount::Number(target));

        match item.item_status {
            ItemStatus::Approved => {
                item.actual_amount = Some(Amount::Number(target));
                item.budget_amount = Some(Amount::Number(target));
                item.approved_amount = Some(Amount::Number(target));
                approved_total += target;
            }
            ItemStatus::Rejected => {
                item.actual_amount = Some(Amount::Number(0.0));
                item.budget_amount = Some(Amount::Number(0.0));
                item.approved_amount = Some(Amount::Number(0.0));
            }
            ItemStatus::Pending => {
                // Approval-only fields are not yet meaningful; leave them.
            }
        }
    }

    reconciled.total_budget_amount = approved_total;
    reconciled.total_expenditure = approved_total;
    reconciled.total_approved_amount = approved_total;
    reconciled
}

fn log_coercions(item: &ExpenseItem) {
    let fields = [
        ("budgetAmount", &item.budget_amount),
        ("actualAmount", &item.actual_amount),
        ("approvedAmount", &item.approved_amount),
    ];
    for (name, field) in fields {
        if let Some(amount) = field {
            let unusable = match amount.value() {
                Some(v) => v < 0.0,
                None => true,
            };
            if unusable {
                debug!(
                    category = %item.category,
                    field = name,
                    "coercing unusable amount field to 0"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::models::claim::ExpenseItem;

    fn item(category: &str, status: ItemStatus) -> ExpenseItem {
        ExpenseItem {
            item_status: status,
            ..ExpenseItem::submitted(category.to_string(), None, None)
        }
    }

    fn assert_all_four(item: &ExpenseItem, expected: f64) {
        assert_eq!(item.amount, Some(Amount::Number(expected)));
        assert_eq!(item.actual_amount, Some(Amount::Number(expected)));
        assert_eq!(item.budget_amount, Some(Amount::Number(expected)));
        assert_eq!(item.approved_amount, Some(Amount::Number(expected)));
    }

    #[test]
    fn test_approved_items_synchronize_all_fields() {
        // Scenario A: one item approved on its sanctioned figure, one on its
        // actual figure.
        let mut tea = item("Tea", ItemStatus::Approved);
        tea.approved_amount = Some(Amount::Number(2500.0));
        let mut food = item("Food", ItemStatus::Approved);
        food.actual_amount = Some(Amount::Number(2030.0));

        let claim = ClaimBill {
            expenses: vec![tea, food],
            ..ClaimBill::default()
        };
        let reconciled = reconcile(&claim);

        assert_all_four(&reconciled.expenses[0], 2500.0);
        assert_all_four(&reconciled.expenses[1], 2030.0);
        assert_eq!(reconciled.total_approved_amount, 4530.0);
        assert_eq!(reconciled.total_budget_amount, 4530.0);
        assert_eq!(reconciled.total_expenditure, 4530.0);
    }

    #[test]
    fn test_rejected_items_zeroed_and_excluded() {
        // Scenario B
        let mut van = item("Van hire", ItemStatus::Rejected);
        van.budget_amount = Some(Amount::Number(400.0));

        let reconciled = reconcile(&ClaimBill {
            expenses: vec![van],
            ..ClaimBill::default()
        });

        assert_all_four(&reconciled.expenses[0], 0.0);
        assert_eq!(reconciled.total_approved_amount, 0.0);
    }

    #[test]
    fn test_pending_items_keep_approval_fields() {
        // Scenario C
        let mut stationery = item("Stationery", ItemStatus::Pending);
        stationery.budget_amount = Some(Amount::Number(345.0));

        let reconciled = reconcile(&ClaimBill {
            expenses: vec![stationery],
            ..ClaimBill::default()
        });

        let out = &reconciled.expenses[0];
        assert_eq!(out.amount, Some(Amount::Number(345.0)));
        assert_eq!(out.approved_amount, None);
        assert_eq!(out.actual_amount, None);
        assert_eq!(reconciled.total_approved_amount, 0.0);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut tea = item("Tea", ItemStatus::Approved);
        tea.approved_amount = Some(Amount::Number(2500.0));
        let mut bad = item("Misc", ItemStatus::Approved);
        bad.actual_amount = Some(Amount::Text("abc".to_string()));
        let pending = item("Stationery", ItemStatus::Pending);
        let mut rejected = item("Van hire", ItemStatus::Rejected);
        rejected.budget_amount = Some(Amount::Number(400.0));

        let claim = ClaimBill {
            expenses: vec![tea, bad, pending, rejected],
            ..ClaimBill::default()
        };

        let once = reconcile(&claim);
        let twice = reconcile(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unusable_fields_coerce_to_zero() {
        let mut bad = item("Misc", ItemStatus::Approved);
        bad.approved_amount = Some(Amount::Text("abc".to_string()));
        // A present-but-unparsable sanctioned figure does not fall through
        // to the actual figure.
        bad.actual_amount = Some(Amount::Number(900.0));

        let reconciled = reconcile(&ClaimBill {
            expenses: vec![bad],
            ..ClaimBill::default()
        });
        assert_all_four(&reconciled.expenses[0], 0.0);
    }

    #[test]
    fn test_negative_amounts_coerce_to_zero() {
        let mut bad = item("Misc", ItemStatus::Approved);
        bad.approved_amount = Some(Amount::Number(-250.0));

        let reconciled = reconcile(&ClaimBill {
            expenses: vec![bad],
            ..ClaimBill::default()
        });
        assert_all_four(&reconciled.expenses[0], 0.0);
        assert_eq!(reconciled.total_approved_amount, 0.0);
    }

    #[test]
    fn test_order_count_and_identity_preserved() {
        let categories = ["Tea", "Food", "Van hire", "Stationery"];
        let claim = ClaimBill {
            expenses: categories
                .iter()
                .map(|c| item(c, ItemStatus::Pending))
                .collect(),
            ..ClaimBill::default()
        };

        let reconciled = reconcile(&claim);
        assert_eq!(reconciled.expenses.len(), 4);
        for (out, expected) in reconciled.expenses.iter().zip(categories) {
            assert_eq!(out.category, expected);
            assert_eq!(out.item_status, ItemStatus::Pending);
        }
    }

    #[test]
    fn test_amendment_re_reconciles() {
        // approved -> approved with a changed sanctioned figure is a legal
        // transition; a fresh reconcile picks up the new figure.
        let mut tea = item("Tea", ItemStatus::Approved);
        tea.approved_amount = Some(Amount::Number(2500.0));
        let first = reconcile(&ClaimBill {
            expenses: vec![tea],
            ..ClaimBill::default()
        });
        assert_eq!(first.total_approved_amount, 2500.0);

        let mut amended = first.clone();
        amended.expenses[0].approved_amount = Some(Amount::Number(2000.0));
        let second = reconcile(&amended);
        assert_all_four(&second.expenses[0], 2000.0);
        assert_eq!(second.total_approved_amount, 2000.0);
    }

    #[test]
    fn test_submitted_amount_survives_approval() {
        let mut tea = ExpenseItem::submitted(
            "Tea".to_string(),
            Some(Amount::Number(3000.0)),
            Some(Amount::Number(2800.0)),
        );
        tea.item_status = ItemStatus::Approved;
        tea.approved_amount = Some(Amount::Number(2500.0));

        let reconciled = reconcile(&ClaimBill {
            expenses: vec![tea],
            ..ClaimBill::default()
        });

        // The synchronization overwrote actual/budget, but the originally
        // claimed figure is still on record.
        let out = &reconciled.expenses[0];
        assert_all_four(out, 2500.0);
        assert_eq!(out.submitted_amount, Some(Amount::Number(2800.0)));
    }

    #[test]
    fn test_empty_claim() {
        let reconciled = reconcile(&ClaimBill::default());
        assert!(reconciled.expenses.is_empty());
        assert_eq!(reconciled.total_approved_amount, 0.0);
    }
}
