//! User authentication: the session middleware, the backend 401 policy, and
//! the log in, log out, register, and forgot password flows.

mod forgot_password;
mod log_in;
mod log_out;
mod middleware;
mod policy;
mod redirect;
mod register;

pub(crate) use forgot_password::{get_forgot_password_page, post_forgot_password};
pub(crate) use log_in::{get_log_in_page, post_log_in};
pub(crate) use log_out::get_log_out;
pub(crate) use middleware::{admin_guard, auth_guard, auth_guard_hx};
#[cfg(test)]
pub(crate) use middleware::AuthState;
pub(crate) use policy::{RedirectGuard, evict_session_and_redirect};
pub(crate) use register::{get_register_page, post_register};
