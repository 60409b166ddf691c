//! The dashboard page and the per-month aggregation behind it.

mod page;
mod summary;

pub use page::{get_dashboard_page, post_budget};
