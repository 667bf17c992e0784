//! # Analytics
//!
//! Aggregations behind the admin dashboard. Pure functions over an order
//! list and a reference date, so the same inputs always give the same report.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       AnalyticsReport                                   │
//! │                                                                         │
//! │  daily_revenue       7 days ending on `today`, oldest first            │
//! │  top_selling_items   top 5 names by units sold                         │
//! │  status_distribution count per status (zero counts omitted)            │
//! │  monthly_stats       orders, revenue, average, users for `today`'s month│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Revenue is the order total (including tax and delivery) of every order
//! regardless of status.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use ts_rs::TS;

use crate::money::Money;
use crate::order::{Order, OrderStatus};

/// Days covered by [`daily_revenue`].
pub const REVENUE_WINDOW_DAYS: i64 = 7;

/// Entries returned by [`top_selling_items`].
pub const TOP_ITEMS_LIMIT: usize = 5;

// =============================================================================
// Report Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DailyRevenue {
    /// Short weekday label ("Mon").
    pub day: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemSales {
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MonthlyStats {
    pub total_orders: u32,
    pub total_revenue: Money,
    /// Zero when there are no orders this month.
    pub average_order_value: Money,
    pub total_users: u32,
    /// Distinct customers who ordered this month.
    pub active_users: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AnalyticsReport {
    pub daily_revenue: Vec<DailyRevenue>,
    pub top_selling_items: Vec<ItemSales>,
    pub status_distribution: Vec<StatusCount>,
    pub monthly_stats: MonthlyStats,
}

impl AnalyticsReport {
    /// Builds the full dashboard report. `total_users` comes from the user
    /// directory, which this crate does not own.
    pub fn build(orders: &[Order], today: NaiveDate, total_users: u32) -> Self {
        AnalyticsReport {
            daily_revenue: daily_revenue(orders, today),
            top_selling_items: top_selling_items(orders),
            status_distribution: status_distribution(orders),
            monthly_stats: monthly_stats(orders, today, total_users),
        }
    }
}

// =============================================================================
// Aggregations
// =============================================================================

/// Revenue per day for the window ending on `today`, oldest first. Days with
/// no orders are present with zero revenue.
pub fn daily_revenue(orders: &[Order], today: NaiveDate) -> Vec<DailyRevenue> {
    (0..REVENUE_WINDOW_DAYS)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let revenue = orders
                .iter()
                .filter(|o| o.created_at.date_naive() == date)
                .map(Order::total)
                .sum();

            DailyRevenue {
                day: date.format("%a").to_string(),
                date,
                revenue,
            }
        })
        .collect()
}

/// Best sellers by units across all orders. Ties are broken by name so the
/// ranking is stable.
pub fn top_selling_items(orders: &[Order]) -> Vec<ItemSales> {
    let mut sales: BTreeMap<&str, u32> = BTreeMap::new();

    for item in orders.iter().flat_map(|o| o.items.iter()) {
        *sales.entry(item.name.as_str()).or_insert(0) += item.quantity;
    }

    let mut ranked: Vec<ItemSales> = sales
        .into_iter()
        .map(|(name, quantity)| ItemSales {
            name: name.to_string(),
            quantity,
        })
        .collect();

    // BTreeMap order is by name, and sort_by is stable
    ranked.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    ranked.truncate(TOP_ITEMS_LIMIT);
    ranked
}

/// Order count per status, in lifecycle order.
pub fn status_distribution(orders: &[Order]) -> Vec<StatusCount> {
    OrderStatus::ALL
        .iter()
        .map(|&status| StatusCount {
            status,
            count: orders.iter().filter(|o| o.status == status).count() as u32,
        })
        .filter(|sc| sc.count > 0)
        .collect()
}

/// Stats for the calendar month containing `today`.
pub fn monthly_stats(orders: &[Order], today: NaiveDate, total_users: u32) -> MonthlyStats {
    let month_orders: Vec<&Order> = orders
        .iter()
        .filter(|o| {
            let d = o.created_at.date_naive();
            d.year() == today.year() && d.month() == today.month()
        })
        .collect();

    let total_orders = month_orders.len() as u32;
    let total_revenue: Money = month_orders.iter().map(|o| o.total()).sum();

    let average_order_value = if total_orders == 0 {
        Money::zero()
    } else {
        let n = i64::from(total_orders);
        // half-up to the cent
        Money::from_cents((total_revenue.cents() * 2 + n) / (2 * n))
    };

    let active_users = month_orders
        .iter()
        .map(|o| o.user_id.as_str())
        .collect::<HashSet<_>>()
        .len() as u32;

    MonthlyStats {
        total_orders,
        total_revenue,
        average_order_value,
        total_users,
        active_users,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
