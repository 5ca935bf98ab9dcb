//! Data models for programmes and claim bills.
//!
//! These are plain serde values: the portal's store hands fully populated
//! records in by value and receives updated ones back for persistence.

/// Lenient monetary field type
pub mod amount;
/// Claim bill, expense items, and review transitions
pub mod claim;
/// Programme and budget breakdown
pub mod programme;

pub use amount::Amount;
pub use claim::{ClaimBill, ExpenseItem, ItemStatus, ReviewVerdict};
pub use programme::{
    BudgetBreakdown, Coordinator, ExpenseLine, IncomeLine, Programme, UNIVERSITY_OVERHEAD_RATE,
};
