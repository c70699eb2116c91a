//! Derived financial figures over a list of items.
//!
//! Every function here is pure: the caller supplies `today`, so the same
//! input always produces the same output. Burn rates are expressed in minor
//! units per day.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Item, ItemStatus, Money};

/// Bucket for burn-eligible items without a group.
pub const NO_GROUP: &str = "No Group";

/// Dashboard-level aggregates. Recomputed in full from a snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_items: usize,
    pub owned_items: usize,
    pub sold_items: usize,
    /// Minor units per day.
    pub daily_burn_rate: f64,
    pub total_profit: Money,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupBurnRate {
    pub group_name: String,
    /// Summed (not averaged) daily burn of the group, minor units per day.
    pub total_burn: f64,
    pub item_count: usize,
}

/// Distinct labels present in a snapshot, in first-appearance order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    pub groups: Vec<String>,
    pub categories: Vec<String>,
}

/// Whole days the item has been (or was) held, never less than 1.
///
/// The holding period ends at the sale date for sold items and at `today`
/// otherwise. A sale recorded before the purchase also yields 1.
pub fn days_held(item: &Item, today: NaiveDate) -> i64 {
    let end = item.sale.map_or(today, |sale| sale.date);
    (end - item.purchase_date).num_days().max(1)
}

/// `(purchase_price + extra_cost) / days_held`.
pub fn item_daily_burn(item: &Item, today: NaiveDate) -> f64 {
    item.total_cost().as_f64() / days_held(item, today) as f64
}

/// Owned items flagged for daily burn.
pub fn counts_toward_burn(item: &Item) -> bool {
    item.is_owned() && item.daily_burn
}

/// Sum of the daily burn of every item that [`counts_toward_burn`].
pub fn total_daily_burn(items: &[Item], today: NaiveDate) -> f64 {
    items
        .iter()
        .filter(|item| counts_toward_burn(item))
        .map(|item| item_daily_burn(item, today))
        .sum()
}

/// Sum of realized profits, clamped to the `i64` range. Owned items
/// contribute nothing.
pub fn total_profit(items: &[Item]) -> Money {
    items
        .iter()
        .filter_map(Item::profit)
        .fold(Money::ZERO, Money::saturating_add)
}

pub fn dashboard_stats(items: &[Item], today: NaiveDate) -> DashboardStats {
    let sold_items = items
        .iter()
        .filter(|item| item.status() == ItemStatus::Sold)
        .count();

    DashboardStats {
        total_items: items.len(),
        owned_items: items.len() - sold_items,
        sold_items,
        daily_burn_rate: total_daily_burn(items, today),
        total_profit: total_profit(items),
    }
}

/// Per-group rollup of burn-eligible items.
///
/// The output order is unspecified; presentation sorts it.
pub fn group_burn_rates(items: &[Item], today: NaiveDate) -> Vec<GroupBurnRate> {
    let mut groups: HashMap<&str, (f64, usize)> = HashMap::new();

    for item in items.iter().filter(|item| counts_toward_burn(item)) {
        let key = item.group_name.as_deref().unwrap_or(NO_GROUP);
        let entry = groups.entry(key).or_insert((0.0, 0));
        entry.0 += item_daily_burn(item, today);
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(group_name, (total_burn, item_count))| GroupBurnRate {
            group_name: group_name.to_string(),
            total_burn,
            item_count,
        })
        .collect()
}

/// Items whose sale date precedes their purchase date.
///
/// Writes through the engine reject such items, but rows edited elsewhere
/// can still carry them; metrics treat them as held for one day.
pub fn integrity_warnings(items: &[Item]) -> Vec<Uuid> {
    items
        .iter()
        .filter(|item| item.sale.is_some_and(|sale| sale.date < item.purchase_date))
        .map(|item| item.id)
        .collect()
}

pub fn facets(items: &[Item]) -> Facets {
    fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
        let mut seen = HashSet::new();
        values
            .filter(|value| seen.insert(*value))
            .map(ToString::to_string)
            .collect()
    }

    Facets {
        groups: distinct(items.iter().filter_map(|item| item.group_name.as_deref())),
        categories: distinct(items.iter().filter_map(|item| item.category.as_deref())),
    }
}
