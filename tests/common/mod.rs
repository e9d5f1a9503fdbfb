#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use rocketcart::{
    config,
    models::{Product, Stock},
    services::{
        api::{ApiError, CatalogApi},
        cart_service::CartStore,
        storage::{CartStorage, MemoryStorage},
    },
    AppState,
};

pub const KEY: &str = config::DEFAULT_STORAGE_KEY;

#[derive(Default)]
pub struct FakeCatalog {
    pub stock: HashMap<i64, i64>,
    pub products: HashMap<i64, Product>,
}

impl FakeCatalog {
    pub fn item(mut self, id: i64, stock: i64) -> Self {
        self.stock.insert(id, stock);
        self.products.insert(id, shoe(id));
        self
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn stock(&self, product_id: i64) -> Result<Option<Stock>, ApiError> {
        Ok(self
            .stock
            .get(&product_id)
            .map(|&amount| Stock { id: product_id, amount }))
    }

    async fn product(&self, product_id: i64) -> Result<Option<Product>, ApiError> {
        Ok(self.products.get(&product_id).cloned())
    }
}

pub fn shoe(id: i64) -> Product {
    Product::new(id, format!("Tênis {id}"), 100.0, format!("https://cdn/{id}.jpg"))
}

pub fn test_settings() -> config::Settings {
    config::Settings {
        api_url: "http://127.0.0.1:9".to_string(),
        storage_path: "unused.json".to_string(),
        storage_key: KEY.to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

pub async fn test_state(catalog: FakeCatalog, storage: Arc<MemoryStorage>) -> AppState {
    let (events_tx, _events_rx) = tokio::sync::broadcast::channel(16);
    let cart = CartStore::load(Arc::new(catalog), storage, KEY, events_tx).await;

    AppState {
        settings: test_settings(),
        cart: Arc::new(cart),
    }
}

pub async fn persisted(storage: &MemoryStorage) -> Option<Vec<Product>> {
    let raw = storage.get_item(KEY).await.unwrap()?;
    Some(serde_json::from_str(&raw).unwrap())
}
