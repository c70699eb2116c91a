//! HTTP client for the inventory API.
//!
//! [`Client`] implements [`ItemStore`], so a [`engine::DashboardSession`]
//! can run against a remote server exactly as it does against a local
//! database.

use std::future::Future;

use api_types::{
    dashboard::DashboardResponse,
    item::{ItemListQuery, ItemListResponse, ItemView},
};
use engine::{Item, ItemNew, ItemStore, ItemUpdate, Sale};
use reqwest::{Method, RequestBuilder, Url};
use serde::{Deserialize, de::DeserializeOwned};
use uuid::Uuid;

pub use error::{ClientError, Result};

mod convert;
mod error;

/// Page size used when walking every page of `GET /items`.
const FETCH_PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Clone)]
struct BasicAuth {
    username: String,
    password: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
    auth: Option<BasicAuth>,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).map_err(|err| ClientError::BaseUrl(err.to_string()))?;
        // `Url::join` replaces the last segment unless the path ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
            auth: None,
        })
    }

    pub fn with_basic_auth(mut self, username: &str, password: &str) -> Self {
        self.auth = Some(BasicAuth {
            username: username.to_string(),
            password: password.to_string(),
        });
        self
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let endpoint = self
            .base_url
            .join(path)
            .map_err(|err| ClientError::BaseUrl(err.to_string()))?;
        let builder = self.http.request(method, endpoint);
        Ok(match &self.auth {
            Some(auth) => builder.basic_auth(&auth.username, Some(&auth.password)),
            None => builder,
        })
    }

    async fn send(request: RequestBuilder) -> Result<reqwest::Response> {
        let res = request.send().await?;
        if res.status().is_success() {
            return Ok(res);
        }

        let status = res.status();
        let body = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.error)
            .unwrap_or_else(|_| "unknown error".to_string());
        tracing::debug!("request failed with {status}: {body}");
        Err(ClientError::from_status(status.as_u16(), body))
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        Ok(Self::send(request).await?.json::<T>().await?)
    }

    /// One page of `GET /items`.
    pub async fn items_page(&self, query: &ItemListQuery) -> Result<ItemListResponse> {
        let request = self.request(Method::GET, "items")?.query(query);
        Self::send_json(request).await
    }

    pub async fn dashboard(&self) -> Result<DashboardResponse> {
        Self::send_json(self.request(Method::GET, "dashboard")?).await
    }

    /// Every item, walking all pages.
    pub async fn list_items(&self) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        let mut page = 1;
        loop {
            let query = ItemListQuery {
                page: Some(page),
                page_size: Some(FETCH_PAGE_SIZE),
                ..Default::default()
            };
            let res = self.items_page(&query).await?;
            for view in res.items {
                items.push(convert::item_from_view(view)?);
            }
            if page >= res.total_pages {
                break;
            }
            page += 1;
        }
        tracing::debug!("fetched {} items from {}", items.len(), self.base_url);
        Ok(items)
    }

    pub async fn item(&self, item_id: Uuid) -> Result<Item> {
        let request = self.request(Method::GET, &format!("items/{item_id}"))?;
        let view: ItemView = Self::send_json(request).await?;
        Ok(convert::item_from_view(view)?)
    }

    pub async fn create_item(&self, new: ItemNew) -> Result<Item> {
        let request = self
            .request(Method::POST, "items")?
            .json(&convert::map_new(new));
        let view: ItemView = Self::send_json(request).await?;
        Ok(convert::item_from_view(view)?)
    }

    pub async fn update_item(&self, item_id: Uuid, update: ItemUpdate) -> Result<Item> {
        let request = self
            .request(Method::PATCH, &format!("items/{item_id}"))?
            .json(&convert::map_update(update));
        let view: ItemView = Self::send_json(request).await?;
        Ok(convert::item_from_view(view)?)
    }

    pub async fn sell_item(&self, item_id: Uuid, sale: Sale) -> Result<Item> {
        let request = self
            .request(Method::POST, &format!("items/{item_id}/sell"))?
            .json(&convert::map_sale(sale));
        let view: ItemView = Self::send_json(request).await?;
        Ok(convert::item_from_view(view)?)
    }

    pub async fn delete_item(&self, item_id: Uuid) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("items/{item_id}"))?;
        Self::send(request).await?;
        Ok(())
    }
}

impl ItemStore for Client {
    type Error = ClientError;

    fn list_items(&self) -> impl Future<Output = Result<Vec<Item>>> + Send {
        Client::list_items(self)
    }

    fn item(&self, item_id: Uuid) -> impl Future<Output = Result<Item>> + Send {
        Client::item(self, item_id)
    }

    fn create_item(&self, new: ItemNew) -> impl Future<Output = Result<Item>> + Send {
        Client::create_item(self, new)
    }

    fn update_item(
        &self,
        item_id: Uuid,
        update: ItemUpdate,
    ) -> impl Future<Output = Result<Item>> + Send {
        Client::update_item(self, item_id, update)
    }

    fn sell_item(&self, item_id: Uuid, sale: Sale) -> impl Future<Output = Result<Item>> + Send {
        Client::sell_item(self, item_id, sale)
    }

    fn delete_item(&self, item_id: Uuid) -> impl Future<Output = Result<()>> + Send {
        Client::delete_item(self, item_id)
    }
}
