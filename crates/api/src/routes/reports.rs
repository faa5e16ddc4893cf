//! Journal and ledger report routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use ledgerbook_core::ledger::parse_date;
use ledgerbook_core::reports::{Journal, LedgerReport, Period};
use ledgerbook_shared::types::{AccountId, ChartId};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/charts-of-accounts/{chart_id}/journal", get(get_journal))
        .route(
            "/charts-of-accounts/{chart_id}/accounts/{account_id}/ledger",
            get(get_ledger),
        )
}

/// Query parameters shared by the report endpoints.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    /// Start of the window (inclusive), a date or an RFC 3339 instant.
    pub from: Option<String>,
    /// End of the window (inclusive). A bare date covers the whole day.
    pub to: Option<String>,
}

impl PeriodQuery {
    fn period(&self) -> Result<Period, ApiError> {
        let from = bound(self.from.as_deref(), "from")?;
        let mut to = bound(self.to.as_deref(), "to")?;
        if self
            .to
            .as_deref()
            .is_some_and(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").is_ok())
        {
            to += TimeDelta::days(1) - TimeDelta::nanoseconds(1);
        }
        Ok(Period::new(from, to)?)
    }
}

fn bound(raw: Option<&str>, name: &'static str) -> Result<DateTime<Utc>, ApiError> {
    let raw = raw.ok_or(ApiError::MissingParameter(name))?;
    parse_date(raw).ok_or(ApiError::InvalidParameter(name))
}

/// GET `/charts-of-accounts/{chart_id}/journal?from&to`
async fn get_journal(
    State(state): State<AppState>,
    Path(chart_id): Path<ChartId>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Journal>, ApiError> {
    let period = query.period()?;
    Ok(Json(state.ledger.journal(chart_id, period).await?))
}

/// GET `/charts-of-accounts/{chart_id}/accounts/{account_id}/ledger?from&to`
async fn get_ledger(
    State(state): State<AppState>,
    Path((chart_id, account_id)): Path<(ChartId, AccountId)>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<LedgerReport>, ApiError> {
    let period = query.period()?;
    Ok(Json(state.ledger.ledger(chart_id, account_id, period).await?))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn query(from: Option<&str>, to: Option<&str>) -> PeriodQuery {
        PeriodQuery {
            from: from.map(str::to_owned),
            to: to.map(str::to_owned),
        }
    }

    #[test]
    fn test_bare_end_date_covers_whole_day() {
        let period = query(Some("2024-01-01"), Some("2024-01-31")).period().unwrap();
        assert_eq!(period.from, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert!(period.contains(Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap()));
        assert!(!period.contains(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_instant_end_is_taken_as_is() {
        let period = query(Some("2024-01-01"), Some("2024-01-31T12:00:00Z"))
            .period()
            .unwrap();
        assert!(!period.contains(Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 1).unwrap()));
    }

    #[test]
    fn test_missing_reversed_or_malformed_bounds() {
        assert!(matches!(
            query(None, Some("2024-01-31")).period(),
            Err(ApiError::MissingParameter("from"))
        ));
        assert!(matches!(
            query(Some("2024-01-01"), Some("January")).period(),
            Err(ApiError::InvalidParameter("to"))
        ));
        assert!(matches!(
            query(Some("2024-02-01"), Some("2024-01-01")).period(),
            Err(ApiError::Ledger(err)) if err.is_validation()
        ));
    }
}
