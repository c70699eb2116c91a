use api_types::item::{ItemSale, ItemStatus as ApiStatus, ItemView};
use engine::{EngineError, Item, ItemNew, ItemStatus, ItemUpdate, Money, Sale};
use uuid::Uuid;

fn invalid(id: Uuid, reason: impl Into<String>) -> EngineError {
    EngineError::Validation {
        item_id: id.to_string(),
        reason: reason.into(),
    }
}

pub(crate) fn map_sale(sale: Sale) -> ItemSale {
    ItemSale {
        sale_date: sale.date,
        sale_price_minor: sale.price.minor(),
    }
}

/// Rebuild an engine item from its wire view, re-checking its invariants.
pub(crate) fn item_from_view(view: ItemView) -> Result<Item, EngineError> {
    let sale = match (view.sale_date, view.sale_price_minor) {
        (Some(date), Some(price)) => Some(Sale {
            date,
            price: Money::new(price),
        }),
        (None, None) => None,
        _ => {
            return Err(invalid(
                view.id,
                "sale date and sale price must be both present or both absent",
            ));
        }
    };

    let status = match view.status {
        ApiStatus::Owned => ItemStatus::Owned,
        ApiStatus::Sold => ItemStatus::Sold,
    };

    let item = Item {
        id: view.id,
        name: view.name,
        purchase_price: Money::new(view.purchase_price_minor),
        extra_cost: Money::new(view.extra_cost_minor),
        purchase_date: view.purchase_date,
        sale,
        group_name: view.group_name,
        category: view.category,
        daily_burn: view.daily_burn,
    };
    if item.status() != status {
        return Err(invalid(
            item.id,
            format!("status '{}' does not match the sale", status.as_str()),
        ));
    }
    let sale_price = item.sale.map_or(Money::ZERO, |sale| sale.price);
    if [item.purchase_price, item.extra_cost, sale_price]
        .iter()
        .any(|amount| amount.is_negative())
    {
        return Err(invalid(item.id, "negative amount"));
    }
    if item.purchase_price.checked_add(item.extra_cost).is_none() {
        return Err(invalid(item.id, "total cost is out of range"));
    }
    Ok(item)
}

pub(crate) fn map_new(new: ItemNew) -> api_types::item::ItemNew {
    api_types::item::ItemNew {
        name: new.name,
        purchase_price_minor: new.purchase_price.minor(),
        extra_cost_minor: new.extra_cost.minor(),
        purchase_date: new.purchase_date,
        sale: new.sale.map(map_sale),
        group_name: new.group_name,
        category: new.category,
        daily_burn: Some(new.daily_burn),
    }
}

pub(crate) fn map_update(update: ItemUpdate) -> api_types::item::ItemUpdate {
    let (sale, clear_sale) = match update.sale {
        Some(Some(sale)) => (Some(map_sale(sale)), None),
        Some(None) => (None, Some(true)),
        None => (None, None),
    };

    api_types::item::ItemUpdate {
        name: update.name,
        purchase_price_minor: update.purchase_price.map(Money::minor),
        extra_cost_minor: update.extra_cost.map(Money::minor),
        purchase_date: update.purchase_date,
        group_name: update.group_name.map(Option::unwrap_or_default),
        category: update.category.map(Option::unwrap_or_default),
        daily_burn: update.daily_burn,
        sale,
        clear_sale,
    }
}
