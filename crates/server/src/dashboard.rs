//! Dashboard endpoint

use api_types::dashboard::{DashboardDisplay, DashboardResponse, DashboardStats, GroupBurnRate};
use axum::{Json, extract::State};
use engine::Snapshot;

use crate::{ServerError, items, server::ServerState};

fn map_currency(currency: engine::Currency) -> api_types::Currency {
    match currency {
        engine::Currency::Thb => api_types::Currency::Thb,
        engine::Currency::Eur => api_types::Currency::Eur,
        engine::Currency::Usd => api_types::Currency::Usd,
    }
}

fn map_snapshot(snapshot: Snapshot, currency: engine::Currency) -> DashboardResponse {
    let stats = snapshot.stats;
    let mut rates = snapshot.group_burn_rates;
    rates.sort_by(|a, b| {
        b.total_burn
            .total_cmp(&a.total_burn)
            .then_with(|| a.group_name.cmp(&b.group_name))
    });

    DashboardResponse {
        currency: map_currency(currency),
        display: DashboardDisplay {
            daily_burn_rate: currency.format(stats.daily_burn_rate, None),
            total_profit: currency.format(stats.total_profit.as_f64(), Some(0)),
        },
        stats: DashboardStats {
            total_items: stats.total_items,
            owned_items: stats.owned_items,
            sold_items: stats.sold_items,
            daily_burn_rate_minor: stats.daily_burn_rate,
            total_profit_minor: stats.total_profit.minor(),
        },
        group_burn_rates: rates
            .into_iter()
            .map(|rate| GroupBurnRate {
                group_name: rate.group_name,
                total_burn_minor: rate.total_burn,
                item_count: rate.item_count,
            })
            .collect(),
        groups: snapshot.facets.groups,
        categories: snapshot.facets.categories,
        integrity_warnings: snapshot.integrity_warnings,
    }
}

pub async fn get(State(state): State<ServerState>) -> Result<Json<DashboardResponse>, ServerError> {
    let items = state.engine.list_items().await?;
    let snapshot = Snapshot::compute(items, items::today());
    Ok(Json(map_snapshot(snapshot, state.engine.currency())))
}
