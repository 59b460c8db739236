//! # Dashboard Statistics
//!
//! Pure aggregation over the sales history for the dashboard view.
//!
//! ## Time Windows
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  today:  [local midnight of `now` .. ∞)                              │
//! │  week:   [`now` - 7 days .. ∞)          (rolling)                    │
//! │  month:  [local midnight of day 1 of `now`'s month .. ∞)  (calendar) │
//! │  all:    every recorded sale                                         │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Window boundaries are computed in the caller's timezone; sale
//! timestamps are stored in UTC and compared as instants.

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::sale::Sale;

// =============================================================================
// Aggregates
// =============================================================================

/// Sale count and revenue over one time window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowStats {
    pub sale_count: u64,
    pub revenue_cents: i64,
}

impl WindowStats {
    /// Revenue as Money.
    #[inline]
    pub fn revenue(&self) -> Money {
        Money::from_cents(self.revenue_cents)
    }
}

/// The full dashboard aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub today: WindowStats,
    pub week: WindowStats,
    pub month: WindowStats,
    pub all_time: WindowStats,

    /// Total quantity of units sold, all time.
    pub items_sold: i64,

    /// All-time revenue divided by all-time sale count, truncated to whole
    /// cents. Zero when no sales are recorded.
    pub average_sale_cents: i64,
}

impl DashboardStats {
    #[inline]
    pub fn average_sale(&self) -> Money {
        Money::from_cents(self.average_sale_cents)
    }
}

/// One row of the best-sellers ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopItem {
    pub name: String,
    pub quantity: i64,
    pub revenue_cents: i64,
}

// =============================================================================
// Aggregation
// =============================================================================

/// Computes the dashboard aggregate over the sales history.
///
/// `now` anchors the time windows; its timezone defines where "today"
/// starts. Pure function over its inputs.
pub fn compute_stats<Tz: TimeZone>(sales: &[Sale], now: &DateTime<Tz>) -> DashboardStats {
    let day_start = start_of_day(now);
    let week_start = now.clone() - Duration::days(7);
    let month_start = start_of_month(now);

    let mut stats = DashboardStats::default();

    for sale in sales {
        stats.all_time.sale_count += 1;
        stats.all_time.revenue_cents += sale.total_cents;
        stats.items_sold += sale.item_count;

        if sale.timestamp >= day_start {
            stats.today.sale_count += 1;
            stats.today.revenue_cents += sale.total_cents;
        }
        if sale.timestamp >= week_start {
            stats.week.sale_count += 1;
            stats.week.revenue_cents += sale.total_cents;
        }
        if sale.timestamp >= month_start {
            stats.month.sale_count += 1;
            stats.month.revenue_cents += sale.total_cents;
        }
    }

    if stats.all_time.sale_count > 0 {
        stats.average_sale_cents =
            stats.all_time.revenue_cents / stats.all_time.sale_count as i64;
    }

    stats
}

/// Ranks items by total quantity sold, descending, at most `limit` rows.
///
/// Items are grouped by name as billed. Ties keep the order in which the
/// names first appear in the history (stable sort).
pub fn top_items(sales: &[Sale], limit: usize) -> Vec<TopItem> {
    let mut ranked: Vec<TopItem> = Vec::new();

    for sale in sales {
        for line in &sale.lines {
            match ranked.iter_mut().find(|t| t.name == line.name) {
                Some(entry) => {
                    entry.quantity += line.quantity;
                    entry.revenue_cents += line.line_total_cents;
                }
                None => ranked.push(TopItem {
                    name: line.name.clone(),
                    quantity: line.quantity,
                    revenue_cents: line.line_total_cents,
                }),
            }
        }
    }

    ranked.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    ranked.truncate(limit);
    ranked
}

fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    now.with_time(NaiveTime::MIN)
        .single()
        .unwrap_or_else(|| now.clone())
        .with_timezone(&Utc)
}

fn start_of_month<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let first = now
        .date_naive()
        .with_day(1)
        .and_then(|d| d.and_time(NaiveTime::MIN).and_local_timezone(now.timezone()).single());
    match first {
        Some(ts) => ts.with_timezone(&Utc),
        None => start_of_day(now),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
