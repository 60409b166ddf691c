//! Administrator pages: the user account listing and the all-users
//! transaction listing.

mod transactions;
mod users;

pub use transactions::get_admin_transactions_page;
pub use users::{get_admin_users_page, post_toggle_user};
