use serde::{Deserialize, Serialize};

/// Remote availability record for a product. Never owned by the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: i64,
    pub amount: i64,
}

impl Stock {
    pub fn covers(&self, requested: i64) -> bool {
        requested <= self.amount
    }
}
