pub mod product;
pub mod stock;
pub mod cart;
pub mod notification;

pub use product::Product;
pub use stock::Stock;
pub use cart::CartSummary;
pub use notification::{CartEvent, Notification};
