//! Personal inventory engine.
//!
//! - [`Item`] and its write commands, persisted in the `items` table.
//! - [`metrics`]: burn rate, profit and group rollups over a snapshot.
//! - [`query`]: search, filters and pagination over a snapshot.
//! - [`ItemStore`]: the data-access seam, implemented by [`Engine`] (sea-orm).
//! - [`DashboardSession`]: the snapshot holder used by front ends.

pub use currency::Currency;
pub use dashboard::{DashboardSession, ItemRow, Snapshot};
pub use error::EngineError;
pub use items::{Item, ItemNew, ItemStatus, ItemUpdate, Sale};
pub use metrics::{DashboardStats, Facets, GroupBurnRate, NO_GROUP};
pub use money::Money;
pub use ops::{Engine, EngineBuilder};
pub use query::{DEFAULT_PAGE_SIZE, ItemFilter, ItemQuery, Page, filter_items, paginate};
pub use store::{ItemStore, StoreError};

mod currency;
mod dashboard;
mod error;
mod items;
pub mod metrics;
mod money;
mod ops;
pub mod query;
mod store;
mod util;

pub(crate) type ResultEngine<T> = Result<T, EngineError>;
