//! `progdesk` - reconciliation and document-composition core for a
//! training-programme administration portal.
//!
//! Coordinators create training programmes, submit claim bills, and
//! generate the administrative documents that move a programme through
//! approval: note-orders, budget sheets, claim receipts, and certificates.
//! This crate holds the two components those flows share:
//!
//! - claim reconciliation: keeps each expense item's redundant amount
//!   fields and the claim-level totals consistent with its approval status
//! - document composition: renders programme data into paginated PDFs and
//!   template-driven certificates
//!
//! Routing, authentication, uploads, and persistence live in the portal
//! around this crate; everything here operates on in-memory values handed
//! in by the caller.

#![deny(
    unsafe_code,
    unsafe_op_in_unsafe_fn,
    unreachable_code,
    unreachable_patterns,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::dbg_macro,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,     // Will add gradually
    clippy::missing_panics_doc,
    clippy::cast_precision_loss,    // Row counts and serials are small
)]

/// Document composition - note-orders, claim receipts, certificates
pub mod compose;
/// Runtime settings from the environment
pub mod config;
/// Core business logic - reconciliation and formatting helpers
pub mod core;
/// Unified error types and result handling
pub mod errors;
/// Programme and claim data models
pub mod models;
/// Periodic background task primitive
pub mod scheduler;
/// Certificate template registry
pub mod templates;

#[cfg(test)]
pub mod test_utils;
