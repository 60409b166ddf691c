//! The statistics page and the monthly aggregation behind it.

mod page;
mod summary;

pub use page::get_statistics_page;
