//! # Ledger Queries
//!
//! Date-range filtering over the sales ledger and the range presets shown in
//! the sales-history view.
//!
//! ## Calendar Day Convention
//! A sale belongs to the **UTC** calendar day of its timestamp, and presets
//! are computed from the UTC "now". A receipt printed at 07:30 in Manila
//! (UTC+8) is therefore filed under the previous day until 08:00 local.
//!
//! ```text
//! sale.date = 2026-10-16T23:30:00Z ──► day 2026-10-16
//!
//! from = 2026-10-16, to = 2026-10-16   ✓ included (both bounds inclusive)
//! from = 2026-10-17                     ✗ excluded
//! ```

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::Sale;

/// Inclusive date range; an absent bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DateRange {
    #[ts(as = "Option<String>")]
    pub from: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Range with no bounds (all time).
    pub const fn all() -> Self {
        DateRange { from: None, to: None }
    }

    pub const fn between(from: NaiveDate, to: NaiveDate) -> Self {
        DateRange {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Parses the two date inputs of the filter bar.
    ///
    /// Each side is `YYYY-MM-DD` or empty (open bound).
    ///
    /// ```rust
    /// use vendure_core::ledger::DateRange;
    ///
    /// let range = DateRange::parse("2026-10-01", "").unwrap();
    /// assert!(range.from.is_some());
    /// assert!(range.to.is_none());
    /// assert!(DateRange::parse("10/01/2026", "").is_err());
    /// ```
    pub fn parse(from: &str, to: &str) -> Result<Self, ValidationError> {
        Ok(DateRange {
            from: parse_bound("from", from)?,
            to: parse_bound("to", to)?,
        })
    }

    /// Whether a calendar day falls inside the range.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from.map_or(true, |from| day >= from) && self.to.map_or(true, |to| day <= to)
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

fn parse_bound(field: &str, input: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::invalid_format(field, "expected YYYY-MM-DD"))
}

/// Quick filters of the sales-history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RangePreset {
    Today,
    /// Sunday through Saturday of the current week.
    ThisWeek,
    /// First through last day of the current month.
    ThisMonth,
    AllTime,
}

impl RangePreset {
    /// Resolves the preset relative to `now`.
    pub fn resolve(self, now: DateTime<Utc>) -> DateRange {
        let today = now.date_naive();

        match self {
            RangePreset::Today => DateRange::between(today, today),
            RangePreset::ThisWeek => {
                let sunday =
                    today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
                DateRange::between(sunday, sunday + Duration::days(6))
            }
            RangePreset::ThisMonth => DateRange {
                from: today.with_day(1),
                to: last_day_of_month(today),
            },
            RangePreset::AllTime => DateRange::all(),
        }
    }
}

fn last_day_of_month(day: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if day.month() == 12 {
        (day.year() + 1, 1)
    } else {
        (day.year(), day.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).and_then(|first| first.pred_opt())
}

/// Calendar day a sale is filed under (UTC).
#[inline]
pub fn sale_day(sale: &Sale) -> NaiveDate {
    sale.date.date_naive()
}

/// Keeps the sales whose day falls inside `range`, preserving ledger order.
pub fn filter_by_date_range(sales: &[Sale], range: &DateRange) -> Vec<Sale> {
    sales
        .iter()
        .filter(|sale| range.contains(sale_day(sale)))
        .cloned()
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
