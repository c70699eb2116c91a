//! Dashboard snapshot and the session that owns it.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    EngineError, Item, ItemQuery, ItemStore, Page, ResultEngine, StoreError,
    metrics::{self, DashboardStats, Facets, GroupBurnRate},
};

/// Items fetched at load time plus everything derived from them.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub items: Vec<Item>,
    pub stats: DashboardStats,
    pub group_burn_rates: Vec<GroupBurnRate>,
    pub facets: Facets,
    /// Items with a sale dated before the purchase.
    pub integrity_warnings: Vec<Uuid>,
    pub computed_on: NaiveDate,
}

impl Snapshot {
    pub fn compute(items: Vec<Item>, today: NaiveDate) -> Self {
        let integrity_warnings = metrics::integrity_warnings(&items);
        for id in &integrity_warnings {
            tracing::warn!("item {id} has a sale date before its purchase date");
        }

        Self {
            stats: metrics::dashboard_stats(&items, today),
            group_burn_rates: metrics::group_burn_rates(&items, today),
            facets: metrics::facets(&items),
            integrity_warnings,
            computed_on: today,
            items,
        }
    }
}

/// A row of the visible list with its own burn.
///
/// The burn is computed for every row, whatever its status or flag; only
/// the aggregates honour the inclusion policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemRow<'a> {
    pub item: &'a Item,
    pub daily_burn: f64,
}

/// Read-mostly dashboard state over an [`ItemStore`].
///
/// The snapshot is replaced wholesale on [`reload`](Self::reload) and never
/// patched in place.
#[derive(Debug)]
pub struct DashboardSession<S> {
    store: S,
    snapshot: Option<Snapshot>,
    query: ItemQuery,
    loading: bool,
}

impl<S: ItemStore> DashboardSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            snapshot: None,
            query: ItemQuery::default(),
            loading: false,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn query(&self) -> &ItemQuery {
        &self.query
    }

    pub fn set_query(&mut self, query: ItemQuery) {
        self.query = query;
    }

    /// Fetch every item and recompute the snapshot.
    ///
    /// On failure the previous snapshot is kept. A malformed item comes back
    /// as [`EngineError::Validation`], anything else as [`EngineError::Fetch`].
    /// Nothing is retried.
    pub async fn reload(&mut self, today: NaiveDate) -> ResultEngine<()> {
        self.loading = true;
        let fetched = self.store.list_items().await;
        self.loading = false;

        match fetched {
            Ok(items) => {
                tracing::info!("dashboard loaded {} items", items.len());
                self.snapshot = Some(Snapshot::compute(items, today));
                Ok(())
            }
            Err(err) => {
                tracing::warn!("failed to fetch dashboard data: {err}");
                Err(match err.validation() {
                    Some((item_id, reason)) => EngineError::validation(item_id, reason),
                    None => EngineError::Fetch(err.to_string()),
                })
            }
        }
    }

    /// Current page of the filtered list. Empty before the first load.
    pub fn visible(&self) -> Page<ItemRow<'_>> {
        let items = self.snapshot.as_ref().map_or(&[][..], |s| s.items.as_slice());
        let today = self
            .snapshot
            .as_ref()
            .map_or(NaiveDate::MIN, |s| s.computed_on);

        self.query.apply(items).map(|item| ItemRow {
            item,
            daily_burn: metrics::item_daily_burn(item, today),
        })
    }
}
