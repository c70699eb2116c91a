//! Items API endpoints

use api_types::item::{
    ItemListQuery, ItemListResponse, ItemNew, ItemSale, ItemStatus as ApiStatus, ItemUpdate,
    ItemView,
};
use axum::{
    Json,
    extract::{FromRequestParts, Path, Query, State},
    http::{StatusCode, request::Parts},
};
use chrono::{NaiveDate, Utc};
use engine::{ItemQuery, Money, Sale, metrics};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

/// The `{id}` path segment. A malformed id is answered with the usual JSON
/// error body.
pub struct ItemId(Uuid);

impl<S: Send + Sync> FromRequestParts<S> for ItemId {
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ServerError::Generic(rejection.body_text()))?;
        Ok(Self(id))
    }
}

fn map_status(status: engine::ItemStatus) -> ApiStatus {
    match status {
        engine::ItemStatus::Owned => ApiStatus::Owned,
        engine::ItemStatus::Sold => ApiStatus::Sold,
    }
}

fn parse_status(status: ApiStatus) -> engine::ItemStatus {
    match status {
        ApiStatus::Owned => engine::ItemStatus::Owned,
        ApiStatus::Sold => engine::ItemStatus::Sold,
    }
}

fn map_sale(sale: ItemSale) -> Sale {
    Sale {
        date: sale.sale_date,
        price: Money::new(sale.sale_price_minor),
    }
}

fn map_item(item: &engine::Item, today: NaiveDate) -> ItemView {
    ItemView {
        id: item.id,
        name: item.name.clone(),
        purchase_price_minor: item.purchase_price.minor(),
        extra_cost_minor: item.extra_cost.minor(),
        purchase_date: item.purchase_date,
        sale_date: item.sale.map(|sale| sale.date),
        sale_price_minor: item.sale.map(|sale| sale.price.minor()),
        status: map_status(item.status()),
        group_name: item.group_name.clone(),
        category: item.category.clone(),
        daily_burn: item.daily_burn,
        daily_burn_minor: metrics::item_daily_burn(item, today),
        profit_minor: item.profit().map(Money::minor),
    }
}

/// Burn figures are computed against the current UTC date.
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Empty string clears the field.
fn nullable(value: Option<String>) -> Option<Option<String>> {
    value.map(|value| (!value.trim().is_empty()).then_some(value))
}

fn map_update(payload: ItemUpdate) -> Result<engine::ItemUpdate, ServerError> {
    let sale = match (payload.sale, payload.clear_sale.unwrap_or(false)) {
        (Some(_), true) => {
            return Err(ServerError::Generic(
                "provide only one of sale or clear_sale".to_string(),
            ));
        }
        (Some(sale), false) => Some(Some(map_sale(sale))),
        (None, true) => Some(None),
        (None, false) => None,
    };

    Ok(engine::ItemUpdate {
        name: payload.name,
        purchase_price: payload.purchase_price_minor.map(Money::new),
        extra_cost: payload.extra_cost_minor.map(Money::new),
        purchase_date: payload.purchase_date,
        sale,
        group_name: nullable(payload.group_name),
        category: nullable(payload.category),
        daily_burn: payload.daily_burn,
    })
}

pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ItemListQuery>,
) -> Result<Json<ItemListResponse>, ServerError> {
    let items = state.engine.list_items().await?;
    let today = today();

    let mut query = ItemQuery::new()
        .with_search(params.search)
        .with_group(params.group)
        .with_status(params.status.map(parse_status))
        .with_category(params.category);
    if let Some(page_size) = params.page_size {
        query = query.with_page_size(page_size);
    }
    if let Some(page) = params.page {
        query = query.with_page(page);
    }

    let page = query.apply(&items);
    Ok(Json(ItemListResponse {
        items: page.items.iter().map(|item| map_item(item, today)).collect(),
        page: page.page,
        page_size: page.page_size,
        total_items: page.total_items,
        total_pages: page.total_pages,
    }))
}

pub async fn get(
    State(state): State<ServerState>,
    ItemId(id): ItemId,
) -> Result<Json<ItemView>, ServerError> {
    let item = state.engine.item(id).await?;
    Ok(Json(map_item(&item, today())))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ItemNew>,
) -> Result<(StatusCode, Json<ItemView>), ServerError> {
    let new = engine::ItemNew {
        name: payload.name,
        purchase_price: Money::new(payload.purchase_price_minor),
        extra_cost: Money::new(payload.extra_cost_minor),
        purchase_date: payload.purchase_date,
        sale: payload.sale.map(map_sale),
        group_name: payload.group_name,
        category: payload.category,
        daily_burn: payload.daily_burn.unwrap_or(true),
    };
    let item = state.engine.create_item(new).await?;
    tracing::info!("created item {} ({})", item.id, item.name);

    Ok((StatusCode::CREATED, Json(map_item(&item, today()))))
}

pub async fn update(
    State(state): State<ServerState>,
    ItemId(id): ItemId,
    Json(payload): Json<ItemUpdate>,
) -> Result<Json<ItemView>, ServerError> {
    let update = map_update(payload)?;
    let item = state.engine.update_item(id, update).await?;
    Ok(Json(map_item(&item, today())))
}

pub async fn sell(
    State(state): State<ServerState>,
    ItemId(id): ItemId,
    Json(payload): Json<ItemSale>,
) -> Result<Json<ItemView>, ServerError> {
    let item = state.engine.sell_item(id, map_sale(payload)).await?;
    tracing::info!("sold item {}", item.id);
    Ok(Json(map_item(&item, today())))
}

pub async fn delete(
    State(state): State<ServerState>,
    ItemId(id): ItemId,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_item(id).await?;
    tracing::info!("deleted item {id}");
    Ok(StatusCode::NO_CONTENT)
}
