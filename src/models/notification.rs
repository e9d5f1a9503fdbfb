use chrono::Utc;
use serde::Serialize;

/// Transient user-facing message (a toast on the storefront).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub message: String,
    pub created_at: i64,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created_at: Utc::now().timestamp(),
        }
    }
}

/// Everything the store publishes on its broadcast channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CartEvent {
    CartUpdated { distinct_products: usize },
    Toast(Notification),
}

impl CartEvent {
    /// SSE event name, matching the names the storefront listens for.
    pub fn name(&self) -> &'static str {
        match self {
            CartEvent::CartUpdated { .. } => "cartUpdated",
            CartEvent::Toast(_) => "toast",
        }
    }
}
