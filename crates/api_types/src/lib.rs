use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Thb,
    Eur,
    Usd,
}

pub mod item {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ItemStatus {
        Owned,
        Sold,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ItemSale {
        pub sale_date: NaiveDate,
        pub sale_price_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItemNew {
        pub name: String,
        pub purchase_price_minor: i64,
        #[serde(default)]
        pub extra_cost_minor: i64,
        /// `YYYY-MM-DD`
        pub purchase_date: NaiveDate,
        pub sale: Option<ItemSale>,
        pub group_name: Option<String>,
        pub category: Option<String>,
        /// Defaults to `true`.
        pub daily_burn: Option<bool>,
    }

    /// Partial update. Missing fields are left untouched.
    ///
    /// An empty `group_name` or `category` clears the value; `clear_sale`
    /// moves a sold item back to owned.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ItemUpdate {
        pub name: Option<String>,
        pub purchase_price_minor: Option<i64>,
        pub extra_cost_minor: Option<i64>,
        pub purchase_date: Option<NaiveDate>,
        pub group_name: Option<String>,
        pub category: Option<String>,
        pub daily_burn: Option<bool>,
        pub sale: Option<ItemSale>,
        pub clear_sale: Option<bool>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ItemView {
        pub id: Uuid,
        pub name: String,
        pub purchase_price_minor: i64,
        pub extra_cost_minor: i64,
        pub purchase_date: NaiveDate,
        pub sale_date: Option<NaiveDate>,
        pub sale_price_minor: Option<i64>,
        pub status: ItemStatus,
        pub group_name: Option<String>,
        pub category: Option<String>,
        pub daily_burn: bool,
        /// Per-item burn as of the request day, in minor units per day.
        pub daily_burn_minor: f64,
        /// Realized profit, only for sold items.
        pub profit_minor: Option<i64>,
    }

    /// Query string of `GET /items`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ItemListQuery {
        pub search: Option<String>,
        pub group: Option<String>,
        pub status: Option<ItemStatus>,
        pub category: Option<String>,
        pub page: Option<usize>,
        pub page_size: Option<usize>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItemListResponse {
        pub items: Vec<ItemView>,
        pub page: usize,
        pub page_size: usize,
        pub total_items: usize,
        pub total_pages: usize,
    }
}

pub mod dashboard {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DashboardStats {
        pub total_items: usize,
        pub owned_items: usize,
        pub sold_items: usize,
        pub daily_burn_rate_minor: f64,
        pub total_profit_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupBurnRate {
        pub group_name: String,
        pub total_burn_minor: f64,
        pub item_count: usize,
    }

    /// Headline figures already formatted in the engine currency.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct DashboardDisplay {
        pub daily_burn_rate: String,
        pub total_profit: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DashboardResponse {
        pub currency: Currency,
        pub stats: DashboardStats,
        pub display: DashboardDisplay,
        /// Sorted by burn, highest first.
        pub group_burn_rates: Vec<GroupBurnRate>,
        pub groups: Vec<String>,
        pub categories: Vec<String>,
        /// Ids of sold items whose sale predates the purchase.
        pub integrity_warnings: Vec<Uuid>,
    }
}
