//! The module contains the `Item` struct, its write commands and the
//! `items` table entity.

use chrono::{NaiveDate, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, Money, ResultEngine,
    util::{format_date, normalize_optional_text, normalize_required_name, parse_item_date},
};

/// Ownership status of an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Owned,
    Sold,
}

impl ItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owned => "owned",
            Self::Sold => "sold",
        }
    }
}

impl TryFrom<&str> for ItemStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "owned" => Ok(Self::Owned),
            "sold" => Ok(Self::Sold),
            other => Err(EngineError::InvalidStatus(other.to_string())),
        }
    }
}

/// A realized sale. Date and price always travel together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub date: NaiveDate,
    pub price: Money,
}

/// One tracked physical object.
///
/// The status is not stored on the struct: an item is [`ItemStatus::Sold`]
/// exactly when it carries a [`Sale`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub purchase_price: Money,
    /// Shipping, fees and anything else paid on top of the price.
    pub extra_cost: Money,
    pub purchase_date: NaiveDate,
    pub sale: Option<Sale>,
    pub group_name: Option<String>,
    pub category: Option<String>,
    /// Whether the item counts toward aggregate burn statistics.
    pub daily_burn: bool,
}

impl Item {
    pub fn status(&self) -> ItemStatus {
        if self.sale.is_some() {
            ItemStatus::Sold
        } else {
            ItemStatus::Owned
        }
    }

    pub fn is_owned(&self) -> bool {
        self.sale.is_none()
    }

    /// Price plus extra cost.
    pub fn total_cost(&self) -> Money {
        self.purchase_price.saturating_add(self.extra_cost)
    }

    /// Realized profit, `None` while the item is still owned.
    pub fn profit(&self) -> Option<Money> {
        self.sale
            .map(|sale| sale.price - self.purchase_price - self.extra_cost)
    }

    /// Check the write-time invariants of the item.
    pub fn validate(&self) -> ResultEngine<()> {
        if self.name.trim().is_empty() {
            return Err(EngineError::validation(self.id, "name must not be empty"));
        }
        if self.purchase_price.is_negative() {
            return Err(EngineError::validation(
                self.id,
                "purchase price must be >= 0",
            ));
        }
        if self.extra_cost.is_negative() {
            return Err(EngineError::validation(self.id, "extra cost must be >= 0"));
        }
        if self.purchase_price.checked_add(self.extra_cost).is_none() {
            return Err(EngineError::validation(self.id, "total cost is out of range"));
        }
        if let Some(sale) = self.sale {
            if sale.price.is_negative() {
                return Err(EngineError::validation(self.id, "sale price must be >= 0"));
            }
            if sale.date < self.purchase_date {
                return Err(EngineError::validation(
                    self.id,
                    "sale date must not be before purchase date",
                ));
            }
        }
        Ok(())
    }

    /// Build a new item from a create command, generating its id.
    pub fn from_new(new: ItemNew) -> ResultEngine<Self> {
        let item = Self {
            id: Uuid::new_v4(),
            name: normalize_required_name(&new.name, "item")?,
            purchase_price: new.purchase_price,
            extra_cost: new.extra_cost,
            purchase_date: new.purchase_date,
            sale: new.sale,
            group_name: normalize_optional_text(new.group_name.as_deref()),
            category: normalize_optional_text(new.category.as_deref()),
            daily_burn: new.daily_burn,
        };
        item.validate()?;
        Ok(item)
    }

    /// Apply a partial update in place and re-check invariants.
    pub fn apply(&mut self, update: ItemUpdate) -> ResultEngine<()> {
        if let Some(name) = update.name {
            self.name = normalize_required_name(&name, "item")?;
        }
        if let Some(price) = update.purchase_price {
            self.purchase_price = price;
        }
        if let Some(extra) = update.extra_cost {
            self.extra_cost = extra;
        }
        if let Some(date) = update.purchase_date {
            self.purchase_date = date;
        }
        if let Some(sale) = update.sale {
            self.sale = sale;
        }
        if let Some(group) = update.group_name {
            self.group_name = normalize_optional_text(group.as_deref());
        }
        if let Some(category) = update.category {
            self.category = normalize_optional_text(category.as_deref());
        }
        if let Some(flag) = update.daily_burn {
            self.daily_burn = flag;
        }
        self.validate()
    }

    /// Record a sale on an owned item.
    pub fn sell(&mut self, sale: Sale) -> ResultEngine<()> {
        if self.sale.is_some() {
            return Err(EngineError::InvalidTransition(format!(
                "item {} is already sold",
                self.id
            )));
        }
        self.sale = Some(sale);
        if let Err(err) = self.validate() {
            self.sale = None;
            return Err(err);
        }
        Ok(())
    }
}

/// Create command for an item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemNew {
    pub name: String,
    pub purchase_price: Money,
    pub extra_cost: Money,
    pub purchase_date: NaiveDate,
    pub sale: Option<Sale>,
    pub group_name: Option<String>,
    pub category: Option<String>,
    pub daily_burn: bool,
}

/// Partial update for an item.
///
/// Outer `None` leaves a field untouched. For nullable fields the inner
/// `None` clears the value (`sale: Some(None)` moves the item back to owned).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub purchase_price: Option<Money>,
    pub extra_cost: Option<Money>,
    pub purchase_date: Option<NaiveDate>,
    pub sale: Option<Option<Sale>>,
    pub group_name: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub daily_burn: Option<bool>,
}

impl ItemUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub purchase_price: i64,
    pub extra_cost: i64,
    /// `YYYY-MM-DD`
    pub purchase_date: String,
    pub sale_date: Option<String>,
    pub sale_price: Option<i64>,
    pub status: String,
    pub group_name: Option<String>,
    pub category: Option<String>,
    pub daily_burn: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Item> for ActiveModel {
    fn from(item: &Item) -> Self {
        Self {
            id: ActiveValue::Set(item.id.to_string()),
            name: ActiveValue::Set(item.name.clone()),
            purchase_price: ActiveValue::Set(item.purchase_price.minor()),
            extra_cost: ActiveValue::Set(item.extra_cost.minor()),
            purchase_date: ActiveValue::Set(format_date(item.purchase_date)),
            sale_date: ActiveValue::Set(item.sale.map(|sale| format_date(sale.date))),
            sale_price: ActiveValue::Set(item.sale.map(|sale| sale.price.minor())),
            status: ActiveValue::Set(item.status().as_str().to_string()),
            group_name: ActiveValue::Set(item.group_name.clone()),
            category: ActiveValue::Set(item.category.clone()),
            daily_burn: ActiveValue::Set(item.daily_burn),
            created_at: ActiveValue::NotSet,
        }
    }
}

impl ActiveModel {
    /// Active model for a first insert, stamping `created_at`.
    pub(crate) fn for_insert(item: &Item) -> Self {
        Self {
            created_at: ActiveValue::Set(Utc::now()),
            ..Self::from(item)
        }
    }
}

impl TryFrom<Model> for Item {
    type Error = EngineError;

    /// Validate a stored row.
    ///
    /// Rows are written by other tools too, so nothing is assumed: every
    /// failure is reported as `Validation` with the row id.
    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let row_id = model.id.as_str();
        let id = Uuid::parse_str(row_id)
            .map_err(|_| EngineError::validation(row_id, "malformed item id"))?;
        let status = ItemStatus::try_from(model.status.as_str()).map_err(|_| {
            EngineError::validation(row_id, format!("unknown status '{}'", model.status))
        })?;
        let purchase_date = parse_item_date(row_id, &model.purchase_date, "purchase")?;

        let sale = match (model.sale_date.as_deref(), model.sale_price) {
            (Some(date), Some(price)) => Some(Sale {
                date: parse_item_date(row_id, date, "sale")?,
                price: Money::new(price),
            }),
            (None, None) => None,
            _ => {
                return Err(EngineError::validation(
                    row_id,
                    "sale date and sale price must be both present or both absent",
                ));
            }
        };

        match (status, sale.is_some()) {
            (ItemStatus::Sold, false) => {
                return Err(EngineError::validation(row_id, "sold item without a sale"));
            }
            (ItemStatus::Owned, true) => {
                return Err(EngineError::validation(row_id, "owned item with a sale"));
            }
            _ => {}
        }

        let amounts = [
            ("purchase price", model.purchase_price),
            ("extra cost", model.extra_cost),
            ("sale price", model.sale_price.unwrap_or(0)),
        ];
        if let Some((label, _)) = amounts.iter().find(|(_, value)| *value < 0) {
            return Err(EngineError::validation(row_id, format!("negative {label}")));
        }
        if model.purchase_price.checked_add(model.extra_cost).is_none() {
            return Err(EngineError::validation(row_id, "total cost is out of range"));
        }

        Ok(Self {
            id,
            name: model.name,
            purchase_price: Money::new(model.purchase_price),
            extra_cost: Money::new(model.extra_cost),
            purchase_date,
            sale,
            group_name: model.group_name,
            category: model.category,
            daily_burn: model.daily_burn,
        })
    }
}
