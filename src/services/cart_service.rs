//! Cart state: an ordered list of line items mirrored to local storage.
//!
//! Every mutation reads a snapshot, checks stock remotely, writes storage and
//! only then swaps the in-memory list. The write lock covers the storage write
//! and the swap but never a catalog call, so racing operations resolve as
//! last-write-wins in both places.

use std::{collections::HashSet, fmt, sync::Arc};

use serde::Deserialize;
use thiserror::Error;
use tokio::sync::{RwLock, broadcast};

use crate::models::{CartEvent, CartSummary, Notification, Product};

use super::{
    api::{ApiError, CatalogApi},
    storage::{CartStorage, StorageError},
};

pub const STOCK_UNAVAILABLE_MSG: &str = "Quantidade solicitada fora de estoque";
pub const ADD_FAILED_MSG: &str = "Erro na adição do produto";
pub const REMOVE_FAILED_MSG: &str = "Erro na remoção do produto";
pub const UPDATE_FAILED_MSG: &str = "Erro na alteração de quantidade do produto";

#[derive(Debug, Error)]
pub enum CartError {
    #[error("requested amount of product {product_id} is out of stock")]
    StockUnavailable { product_id: i64 },

    #[error("product {0} does not exist")]
    ProductNotFound(i64),

    #[error("invalid quantity {0}")]
    InvalidQuantity(i64),

    #[error(transparent)]
    Network(#[from] ApiError),

    #[error("could not persist cart: {0}")]
    Storage(#[from] StorageError),
}

impl CartError {
    pub fn kind(&self) -> &'static str {
        match self {
            CartError::StockUnavailable { .. } => "stock_unavailable",
            CartError::ProductNotFound(_) => "product_not_found",
            CartError::InvalidQuantity(_) => "invalid_quantity",
            CartError::Network(_) => "network",
            CartError::Storage(_) => "storage",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
    Update,
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CartOperation::Add => "add",
            CartOperation::Remove => "remove",
            CartOperation::Update => "update",
        };
        f.write_str(s)
    }
}

/// A failed cart operation. State is untouched whenever one of these is returned.
#[derive(Debug, Error)]
#[error("{operation} failed: {source}")]
pub struct OperationError {
    pub operation: CartOperation,
    #[source]
    pub source: CartError,
}

impl OperationError {
    /// Message shown to the shopper. Only stock problems get their own wording.
    pub fn user_message(&self) -> &'static str {
        if matches!(self.source, CartError::StockUnavailable { .. }) {
            return STOCK_UNAVAILABLE_MSG;
        }
        match self.operation {
            CartOperation::Add => ADD_FAILED_MSG,
            CartOperation::Remove => REMOVE_FAILED_MSG,
            CartOperation::Update => UPDATE_FAILED_MSG,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct UpdateProductAmount {
    pub product_id: i64,
    pub amount: i64,
}

enum AddOutcome {
    Appended,
    Increment(i64),
}

pub struct CartStore {
    cart: RwLock<Vec<Product>>,
    api: Arc<dyn CatalogApi>,
    storage: Arc<dyn CartStorage>,
    storage_key: String,
    events_tx: broadcast::Sender<CartEvent>,
}

impl CartStore {
    /// Builds the store from whatever is persisted under `storage_key`.
    /// Missing or unreadable content starts an empty cart.
    pub async fn load(
        api: Arc<dyn CatalogApi>,
        storage: Arc<dyn CartStorage>,
        storage_key: impl Into<String>,
        events_tx: broadcast::Sender<CartEvent>,
    ) -> Self {
        let storage_key = storage_key.into();
        let cart = restore_cart(storage.as_ref(), &storage_key).await;
        tracing::info!("cart restored with {} product(s)", cart.len());

        Self {
            cart: RwLock::new(cart),
            api,
            storage,
            storage_key,
            events_tx,
        }
    }

    pub async fn cart(&self) -> Vec<Product> {
        self.cart.read().await.clone()
    }

    pub async fn summary(&self) -> CartSummary {
        CartSummary::from_products(self.cart().await)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events_tx.subscribe()
    }

    pub async fn add_product(&self, product_id: i64) -> Result<(), OperationError> {
        match self.try_add(product_id).await {
            Ok(AddOutcome::Appended) => {
                tracing::info!("product {} added to cart", product_id);
                Ok(())
            }
            Ok(AddOutcome::Increment(amount)) => {
                self.update_product_amount(UpdateProductAmount { product_id, amount })
                    .await
            }
            Err(e) => Err(self.fail(CartOperation::Add, e)),
        }
    }

    pub async fn remove_product(&self, product_id: i64) -> Result<(), OperationError> {
        match self.try_remove(product_id).await {
            Ok(()) => {
                tracing::info!("product {} removed from cart", product_id);
                Ok(())
            }
            Err(e) => Err(self.fail(CartOperation::Remove, e)),
        }
    }

    pub async fn update_product_amount(
        &self,
        update: UpdateProductAmount,
    ) -> Result<(), OperationError> {
        match self.try_update(update).await {
            Ok(()) => {
                tracing::info!(
                    "product {} amount set to {}",
                    update.product_id,
                    update.amount
                );
                Ok(())
            }
            Err(e) => Err(self.fail(CartOperation::Update, e)),
        }
    }

    async fn try_add(&self, product_id: i64) -> Result<AddOutcome, CartError> {
        let stock = self.api.stock(product_id).await?;
        if !stock.is_some_and(|s| s.amount > 0) {
            return Err(CartError::StockUnavailable { product_id });
        }

        let snapshot = self.cart().await;
        if let Some(existing) = snapshot.iter().find(|p| p.id == product_id) {
            let Some(amount) = existing.amount.checked_add(1) else {
                return Err(CartError::StockUnavailable { product_id });
            };
            return Ok(AddOutcome::Increment(amount));
        }

        let Some(mut product) = self.api.product(product_id).await? else {
            return Err(CartError::ProductNotFound(product_id));
        };
        product.id = product_id;
        product.amount = 1;

        let mut next = snapshot;
        next.push(product);
        self.commit(next).await?;
        Ok(AddOutcome::Appended)
    }

    async fn try_remove(&self, product_id: i64) -> Result<(), CartError> {
        let snapshot = self.cart().await;
        if !snapshot.iter().any(|p| p.id == product_id) {
            return Err(CartError::ProductNotFound(product_id));
        }

        let next = snapshot.into_iter().filter(|p| p.id != product_id).collect();
        self.commit(next).await
    }

    async fn try_update(&self, update: UpdateProductAmount) -> Result<(), CartError> {
        let UpdateProductAmount { product_id, amount } = update;
        if amount < 1 {
            return Err(CartError::InvalidQuantity(amount));
        }

        let stock = self.api.stock(product_id).await?;
        if !stock.is_some_and(|s| s.covers(amount)) {
            return Err(CartError::StockUnavailable { product_id });
        }

        let mut next = self.cart().await;
        let Some(line) = next.iter_mut().find(|p| p.id == product_id) else {
            return Err(CartError::ProductNotFound(product_id));
        };
        line.amount = amount;

        self.commit(next).await
    }

    /// Persists first; memory only changes once storage accepted the write.
    /// The write lock spans both so storage and memory agree on the winner.
    async fn commit(&self, next: Vec<Product>) -> Result<(), CartError> {
        let serialized = serde_json::to_string(&next)
            .map_err(|e| CartError::Storage(StorageError::Corrupt(e)))?;

        let mut cart = self.cart.write().await;
        self.storage.set_item(&self.storage_key, &serialized).await?;

        let distinct_products = next.len();
        *cart = next;
        drop(cart);

        // no subscribers is fine
        let _ = self
            .events_tx
            .send(CartEvent::CartUpdated { distinct_products });
        Ok(())
    }

    fn fail(&self, operation: CartOperation, source: CartError) -> OperationError {
        let err = OperationError { operation, source };
        tracing::warn!("cart {}", err);
        let _ = self
            .events_tx
            .send(CartEvent::Toast(Notification::error(err.user_message())));
        err
    }
}

async fn restore_cart(storage: &dyn CartStorage, key: &str) -> Vec<Product> {
    let raw = match storage.get_item(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("could not read persisted cart: {}", e);
            return Vec::new();
        }
    };

    let parsed: Vec<Product> = match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("persisted cart is malformed, starting empty: {}", e);
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let before = parsed.len();
    let items: Vec<Product> = parsed
        .into_iter()
        .filter(|p| p.amount >= 1 && seen.insert(p.id))
        .collect();

    if items.len() != before {
        tracing::warn!(
            "dropped {} persisted line(s) with bad amount or duplicate id",
            before - items.len()
        );
    }
    items
}
