use sea_orm::{DatabaseTransaction, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, Item, ItemNew, ItemUpdate, ResultEngine, Sale, items};

use super::{Engine, with_tx};

impl Engine {
    /// All items, newest purchase first.
    ///
    /// A single malformed row fails the whole read with
    /// [`EngineError::Validation`] naming that row.
    pub async fn list_items(&self) -> ResultEngine<Vec<Item>> {
        let models = items::Entity::find()
            .order_by_desc(items::Column::PurchaseDate)
            .order_by_desc(items::Column::CreatedAt)
            .order_by_asc(items::Column::Id)
            .all(&self.database)
            .await?;
        tracing::debug!("loaded {} item rows", models.len());

        models.into_iter().map(Item::try_from).collect()
    }

    pub async fn item(&self, item_id: Uuid) -> ResultEngine<Item> {
        let model = items::Entity::find_by_id(item_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("item not exists".to_string()))?;
        Item::try_from(model)
    }

    pub async fn create_item(&self, new: ItemNew) -> ResultEngine<Item> {
        let item = Item::from_new(new)?;
        items::ActiveModel::for_insert(&item)
            .insert(&self.database)
            .await?;
        tracing::debug!("created item {}", item.id);
        Ok(item)
    }

    pub async fn update_item(&self, item_id: Uuid, update: ItemUpdate) -> ResultEngine<Item> {
        if update.is_empty() {
            return Err(EngineError::validation(item_id, "update must change at least one field"));
        }
        with_tx!(self, |db_tx| {
            let mut item = Self::require_item(&db_tx, item_id).await?;
            item.apply(update)?;
            items::ActiveModel::from(&item).update(&db_tx).await?;
            tracing::debug!("updated item {}", item.id);
            Ok(item)
        })
    }

    /// Move an owned item to sold.
    pub async fn sell_item(&self, item_id: Uuid, sale: Sale) -> ResultEngine<Item> {
        with_tx!(self, |db_tx| {
            let mut item = Self::require_item(&db_tx, item_id).await?;
            item.sell(sale)?;
            items::ActiveModel::from(&item).update(&db_tx).await?;
            tracing::debug!("sold item {} for {}", item.id, sale.price);
            Ok(item)
        })
    }

    pub async fn delete_item(&self, item_id: Uuid) -> ResultEngine<()> {
        let res = items::Entity::delete_by_id(item_id.to_string())
            .exec(&self.database)
            .await?;
        if res.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("item not exists".to_string()));
        }
        tracing::debug!("deleted item {item_id}");
        Ok(())
    }

    async fn require_item(db_tx: &DatabaseTransaction, item_id: Uuid) -> ResultEngine<Item> {
        let model = items::Entity::find_by_id(item_id.to_string())
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("item not exists".to_string()))?;
        Item::try_from(model)
    }
}
