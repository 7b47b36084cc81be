use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw report filter as submitted by the report form. Blank fields mean "no filter".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportFilterInput {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub seller_id: Option<String>,
    pub product: Option<String>,
    pub client_name_contains: Option<String>,
}

/// A validated report filter.
///
/// Dates are calendar days; the effective range is `[date_from 00:00:00, date_to 23:59:59]`
/// inclusive, with a missing bound meaning unbounded on that side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub seller_id: Option<Uuid>,
    pub product: Option<String>,
    pub client_name_contains: Option<String>,
}

impl ReportQuery {
    /// Validates every field before returning, so a malformed value never leaves a
    /// partially applied filter behind.
    pub fn parse(input: &ReportFilterInput) -> ApiResult<Self> {
        let date_from = parse_date(input.date_from.as_deref(), "start date")?;
        let date_to = parse_date(input.date_to.as_deref(), "end date")?;
        let seller_id = match non_blank(input.seller_id.as_deref()) {
            Some(raw) => Some(Uuid::parse_str(&raw).map_err(|_| {
                ApiError::ValidationError(format!("Invalid seller: {raw}"))
            })?),
            None => None,
        };

        Ok(Self {
            date_from,
            date_to,
            seller_id,
            product: non_blank(input.product.as_deref()),
            client_name_contains: non_blank(input.client_name_contains.as_deref()),
        })
    }

    pub fn created_from(&self) -> Option<DateTime<Utc>> {
        self.date_from
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    pub fn created_to(&self) -> Option<DateTime<Utc>> {
        self.date_to
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .map(|dt| dt.and_utc())
    }
}

/// The last report successfully run in a session. Exports are re-derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastReportQuery {
    pub account_id: Uuid,
    pub query: ReportQuery,
    pub executed_at: DateTime<Utc>,
}

impl LastReportQuery {
    pub fn new(account_id: Uuid, query: ReportQuery) -> Self {
        Self {
            account_id,
            query,
            executed_at: Utc::now(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_date(value: Option<&str>, label: &str) -> ApiResult<Option<NaiveDate>> {
    match non_blank(value) {
        Some(raw) => NaiveDate::parse_from_str(&raw, DATE_FORMAT)
            .map(Some)
            .map_err(|_| ApiError::ValidationError(format!("Invalid {label}: {raw}"))),
        None => Ok(None),
    }
}
