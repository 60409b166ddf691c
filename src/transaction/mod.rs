//! The transaction pages: the paginated history, the new-transaction form and
//! the saved (recurring) transactions list.

mod list;
mod new;
mod saved;

pub use list::get_transactions_page;
pub use new::{get_new_transaction_page, post_transaction};
pub use saved::{get_saved_page, post_confirm_saved, post_skip_saved};
