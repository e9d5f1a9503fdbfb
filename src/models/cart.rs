use serde::Serialize;

use super::Product;

/// Read-only view handed to consumers of the store.
#[derive(Debug, Clone, Serialize)]
pub struct CartSummary {
    pub items: Vec<Product>,
    pub distinct_products: usize,
    pub total_amount: i64,
    pub subtotal: f64,
}

impl CartSummary {
    pub fn from_products(items: Vec<Product>) -> Self {
        let total_amount = items.iter().map(|p| p.amount).sum();
        let subtotal = items.iter().map(Product::line_total).sum();

        Self {
            distinct_products: items.len(),
            total_amount,
            subtotal,
            items,
        }
    }
}
