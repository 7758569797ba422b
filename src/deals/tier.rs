// Urgency and pricing derivation for expiry deals
//
// Everything here is a pure function of (record, now). Derived state is
// never persisted: a stored tier would go stale as the clock moves with no
// background job to refresh it, so callers recompute on every read.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Display bucket for a deal, derived from days-until-expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    Fresh,
    Warning,
    Critical,
    Expired,
}

impl UrgencyTier {
    /// Bucket a days-left value: Expired at 0 or below, Critical through
    /// day 3, Warning through day 7, Fresh beyond that
    pub fn from_days_left(days_left: i64) -> Self {
        if days_left <= 0 {
            UrgencyTier::Expired
        } else if days_left <= 3 {
            UrgencyTier::Critical
        } else if days_left <= 7 {
            UrgencyTier::Warning
        } else {
            UrgencyTier::Fresh
        }
    }

    /// Convert tier to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyTier::Fresh => "fresh",
            UrgencyTier::Warning => "warning",
            UrgencyTier::Critical => "critical",
            UrgencyTier::Expired => "expired",
        }
    }
}

impl std::fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derived display state for one deal at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedDealState {
    pub days_left: i64,
    pub urgency_tier: UrgencyTier,
    pub discounted_price: Decimal,
}

/// Days until expiry, as the ceiling of the remaining time in days.
///
/// The expiry date has start-of-day semantics: the comparison point is
/// midnight UTC of `expiry_date`. Negative values mean the deal expired
/// that many whole days ago.
pub fn days_left(expiry_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let expiry_midnight = expiry_date.and_time(NaiveTime::MIN).and_utc();
    let seconds = (expiry_midnight - now).num_seconds();
    seconds.div_euclid(SECONDS_PER_DAY) + i64::from(seconds.rem_euclid(SECONDS_PER_DAY) != 0)
}

/// Price after discount, rounded to 2 decimal places
pub fn discounted_price(original_price: Decimal, discount_percent: Decimal) -> Decimal {
    let factor = (Decimal::ONE_HUNDRED - discount_percent) / Decimal::ONE_HUNDRED;
    (original_price * factor).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute all derived fields for a deal at `now`
pub fn derive_state(
    expiry_date: NaiveDate,
    original_price: Decimal,
    discount_percent: Decimal,
    now: DateTime<Utc>,
) -> DerivedDealState {
    let days_left = days_left(expiry_date, now);
    DerivedDealState {
        days_left,
        urgency_tier: UrgencyTier::from_days_left(days_left),
        discounted_price: discounted_price(original_price, discount_percent),
    }
}
