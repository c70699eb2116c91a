//! Storage seam for the item table.
//!
//! Metrics and filters only need a `Vec<Item>`; anything able to produce
//! one (the local database, the HTTP API, a fixture) can implement
//! [`ItemStore`].

use std::{fmt::Display, future::Future};

use uuid::Uuid;

use crate::{Engine, EngineError, Item, ItemNew, ItemUpdate, Sale};

/// Errors an [`ItemStore`] can fail with.
pub trait StoreError: Display {
    /// `(item_id, reason)` when the failure is a malformed item rather than
    /// a problem reaching the store.
    fn validation(&self) -> Option<(&str, &str)> {
        None
    }
}

impl StoreError for EngineError {
    fn validation(&self) -> Option<(&str, &str)> {
        match self {
            Self::Validation { item_id, reason } => Some((item_id.as_str(), reason.as_str())),
            _ => None,
        }
    }
}

pub trait ItemStore {
    type Error: StoreError;

    /// Every item, ordered by purchase date descending.
    fn list_items(&self) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send;

    fn item(&self, item_id: Uuid) -> impl Future<Output = Result<Item, Self::Error>> + Send;

    fn create_item(&self, new: ItemNew) -> impl Future<Output = Result<Item, Self::Error>> + Send;

    fn update_item(
        &self,
        item_id: Uuid,
        update: ItemUpdate,
    ) -> impl Future<Output = Result<Item, Self::Error>> + Send;

    fn sell_item(
        &self,
        item_id: Uuid,
        sale: Sale,
    ) -> impl Future<Output = Result<Item, Self::Error>> + Send;

    fn delete_item(&self, item_id: Uuid) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

impl ItemStore for Engine {
    type Error = EngineError;

    fn list_items(&self) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send {
        Engine::list_items(self)
    }

    fn item(&self, item_id: Uuid) -> impl Future<Output = Result<Item, Self::Error>> + Send {
        Engine::item(self, item_id)
    }

    fn create_item(&self, new: ItemNew) -> impl Future<Output = Result<Item, Self::Error>> + Send {
        Engine::create_item(self, new)
    }

    fn update_item(
        &self,
        item_id: Uuid,
        update: ItemUpdate,
    ) -> impl Future<Output = Result<Item, Self::Error>> + Send {
        Engine::update_item(self, item_id, update)
    }

    fn sell_item(
        &self,
        item_id: Uuid,
        sale: Sale,
    ) -> impl Future<Output = Result<Item, Self::Error>> + Send {
        Engine::sell_item(self, item_id, sale)
    }

    fn delete_item(&self, item_id: Uuid) -> impl Future<Output = Result<(), Self::Error>> + Send {
        Engine::delete_item(self, item_id)
    }
}
