//! The typed HTTP client for the MyPockit REST backend.
//!
//! All outbound calls go through [ApiClient], which attaches the bearer token
//! and decodes the backend's `{status, response}` envelope exactly once, so
//! the rest of the application only ever sees typed results.

mod client;
mod envelope;
mod models;
pub(crate) mod paths;

pub use client::ApiClient;
pub(crate) use envelope::PageData;
pub(crate) use models::{
    AdminTransactionRow, AdminUserRow, Category, MonthlyTotal, SavedTransaction, SignInResponse,
    TransactionRow, EXPENSE_TYPE_ID, INCOME_TYPE_ID,
};

/// Truncate a monetary amount to two decimal places.
///
/// Applied at the point of receipt for every amount read from the backend;
/// nothing downstream rounds again.
pub(crate) fn truncate_two_dp(amount: f64) -> f64 {
    (amount * 100.0).trunc() / 100.0
}
