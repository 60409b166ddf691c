//! The view models returned by the MyPockit backend.

use serde::Deserialize;

/// The transaction type ID the backend uses for expenses.
pub(crate) const EXPENSE_TYPE_ID: i64 = 1;
/// The transaction type ID the backend uses for income.
pub(crate) const INCOME_TYPE_ID: i64 = 2;

/// The payload of a successful sign-in: the JWT plus the user record.
///
/// This is the only backend response that is not wrapped in the standard
/// success envelope.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SignInResponse {
    pub token: String,
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// A transaction category. Fetched once per page load and immutable from the
/// client's perspective.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Category {
    pub category_id: i64,
    pub category_name: String,
    pub transaction_type: CategoryTransactionType,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// The nested transaction type object on a category record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryTransactionType {
    pub transaction_type_id: i64,
}

impl Category {
    /// Whether this category records expenses (as opposed to income).
    pub(crate) fn is_expense(&self) -> bool {
        self.transaction_type.transaction_type_id == EXPENSE_TYPE_ID
    }
}

/// One record of the backend's monthly summary.
///
/// The backend may omit months with no transactions and does not guarantee
/// ordering; records without a usable `month` field never match a bucket.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MonthlyTotal {
    #[serde(default)]
    pub month: Option<u8>,
    #[serde(default)]
    pub total_income: Option<f64>,
    #[serde(default)]
    pub total_expense: Option<f64>,
}

/// A transaction row in the authenticated user's paginated history.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransactionRow {
    pub transaction_id: i64,
    pub category_name: String,
    pub transaction_type: i64,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: f64,
    pub date: String,
}

/// A saved (recurring) transaction plan.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SavedTransaction {
    pub plan_id: i64,
    pub category_name: String,
    pub transaction_type: i64,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub due_information: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
}

/// A user row in the admin user listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdminUserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub expense: Option<f64>,
    #[serde(default)]
    pub income: Option<f64>,
    #[serde(default)]
    pub no_of_transactions: Option<u64>,
    pub enabled: bool,
}

/// A transaction row in the admin all-transactions listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdminTransactionRow {
    pub transaction_id: i64,
    pub user_email: String,
    pub category_name: String,
    pub transaction_type: i64,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: f64,
    pub date: String,
}

#[cfg(test)]
mod models_tests {
    use super::{Category, MonthlyTotal};

    #[test]
    fn category_deserializes_from_backend_shape() {
        let json = r#"{
            "categoryId": 3,
            "categoryName": "Groceries",
            "transactionType": {"transactionTypeId": 1},
            "enabled": true
        }"#;

        let category: Category = serde_json::from_str(json).unwrap();

        assert_eq!(category.category_id, 3);
        assert_eq!(category.category_name, "Groceries");
        assert!(category.is_expense());
    }

    #[test]
    fn income_category_is_not_expense() {
        let json = r#"{
            "categoryId": 9,
            "categoryName": "Salary",
            "transactionType": {"transactionTypeId": 2}
        }"#;

        let category: Category = serde_json::from_str(json).unwrap();

        assert!(!category.is_expense());
    }

    #[test]
    fn monthly_total_tolerates_missing_fields() {
        let record: MonthlyTotal = serde_json::from_str(r#"{"total_income": 10.0}"#).unwrap();

        assert_eq!(record.month, None);
        assert_eq!(record.total_income, Some(10.0));
        assert_eq!(record.total_expense, None);
    }
}
