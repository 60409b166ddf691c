//! The MyPockit backend API paths, relative to the configured base URL.

/// Log in with email and password, returns the JWT and user record.
pub(crate) const SIGN_IN: &str = "/auth/signin";
/// Register a new user account.
pub(crate) const SIGN_UP: &str = "/auth/signup";
/// Start the forgot-password flow by sending a verification email.
pub(crate) const FORGOT_PASSWORD_VERIFY_EMAIL: &str = "/auth/forgotPassword/verifyEmail";

/// All categories (shared across users).
pub(crate) const CATEGORY_GET_ALL: &str = "/category/getAll";
/// Create a category (admin).
pub(crate) const CATEGORY_NEW: &str = "/category/new";
/// Update a category's name or type (admin).
pub(crate) const CATEGORY_UPDATE: &str = "/category/update";
/// Disable or enable a category (admin).
pub(crate) const CATEGORY_DELETE: &str = "/category/delete";

/// The authenticated user's transactions, paginated.
pub(crate) const TRANSACTION_GET_BY_USER: &str = "/transaction/getByUser";
/// Create a new transaction.
pub(crate) const TRANSACTION_NEW: &str = "/transaction/new";
/// All transactions across users, paginated (admin).
pub(crate) const TRANSACTION_GET_ALL: &str = "/transaction/getAll";

/// All users, paginated (admin).
pub(crate) const USER_GET_ALL: &str = "/user/getAll";
/// Disable or enable a user account (admin).
pub(crate) const USER_DISABLE: &str = "/user/disable";

/// Total income or expense for a user, month, and year.
pub(crate) const REPORT_TOTAL_INCOME_OR_EXPENSE: &str = "/report/getTotalIncomeOrExpense";
/// Number of transactions for a user, month, and year.
pub(crate) const REPORT_TOTAL_NO_OF_TRANSACTIONS: &str = "/report/getTotalNoOfTransactions";
/// Total spent in one category for a user, month, and year.
pub(crate) const REPORT_TOTAL_BY_CATEGORY: &str = "/report/getTotalByCategory";
/// Per-month income/expense totals for a user, all months at once.
pub(crate) const REPORT_MONTHLY_SUMMARY: &str = "/report/getMonthlySummaryByUser";
/// Transaction report as a PDF document (binary response).
pub(crate) const REPORT_EXPORT_PDF: &str = "/report/exportTransactions/pdf";
/// Transaction report as an Excel spreadsheet (binary response).
pub(crate) const REPORT_EXPORT_EXCEL: &str = "/report/exportTransactions/excel";

/// The configured budget for a user, month, and year.
pub(crate) const BUDGET_GET: &str = "/budget/getByUser";
/// Set the budget amount for the current month.
pub(crate) const BUDGET_NEW: &str = "/budget/new";

/// The authenticated user's saved (recurring) transaction plans.
pub(crate) const SAVED_TRANSACTION_GET: &str = "/savedTransaction/getByUser";
/// Confirm a saved transaction plan, recording it as a real transaction.
pub(crate) const SAVED_TRANSACTION_CONFIRM: &str = "/savedTransaction/confirm";
/// Skip the current due date of a saved transaction plan.
pub(crate) const SAVED_TRANSACTION_SKIP: &str = "/savedTransaction/skip";
