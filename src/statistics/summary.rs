//! Aligns the backend's monthly summary records to the trailing twelve month
//! window shown on the statistics chart.
//!
//! The backend returns whatever months it has records for, in no particular
//! order and with no date filter. The chart needs exactly one figure pair per
//! month bucket, so the records are scanned per bucket and missing months are
//! zero-filled.

use crate::{
    Error,
    api::{ApiClient, MonthlyTotal, paths, truncate_two_dp},
    fetch::FetchToken,
    months::MonthBucket,
    session::Session,
};

/// Income and expense totals for one month of the chart window.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthTotals {
    pub income: f64,
    pub expense: f64,
}

/// Fetch the user's monthly summary and align it to `buckets`.
///
/// Returns `Ok(None)` when a newer fetch cycle has superseded `fetch`; the
/// caller must discard the cycle without committing anything. Any backend
/// failure is returned whole so the chart shows no partial results.
pub(crate) async fn load_monthly_totals(
    api: &ApiClient,
    session: &Session,
    buckets: &[MonthBucket],
    fetch: &FetchToken,
) -> Result<Option<Vec<MonthTotals>>, Error> {
    let records: Vec<MonthlyTotal> = api
        .get(
            paths::REPORT_MONTHLY_SUMMARY,
            Some(&session.token),
            &[("email", session.email.clone())],
        )
        .await?
        .unwrap_or_default();

    if !fetch.is_current() {
        return Ok(None);
    }

    Ok(Some(align_to_buckets(buckets, &records)))
}

/// One output entry per bucket, in bucket order.
///
/// For each bucket the first record whose month number matches wins; records
/// without a month number never match any bucket.
fn align_to_buckets(buckets: &[MonthBucket], records: &[MonthlyTotal]) -> Vec<MonthTotals> {
    buckets
        .iter()
        .map(|bucket| {
            records
                .iter()
                .find(|record| record.month == Some(bucket.id))
                .map(|record| MonthTotals {
                    income: truncate_two_dp(record.total_income.unwrap_or(0.0)),
                    expense: truncate_two_dp(record.total_expense.unwrap_or(0.0)),
                })
                .unwrap_or(MonthTotals {
                    income: 0.0,
                    expense: 0.0,
                })
        })
        .collect()
}
