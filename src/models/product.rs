use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub image: String,

    // quantity currently in the cart; the product service omits it
    #[serde(default)]
    pub amount: i64,

    // any other display fields the catalog sends are kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn new(id: i64, title: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: image.into(),
            amount: 0,
            extra: Map::new(),
        }
    }

    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    pub fn line_total(&self) -> f64 {
        self.price * (self.amount as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn catalog_payload_without_amount_defaults_to_zero() {
        let p: Product = serde_json::from_value(json!({
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://example.com/shoe.jpg"
        }))
        .unwrap();

        assert_eq!(p.id, 1);
        assert_eq!(p.amount, 0);
        assert!(p.extra.is_empty());
    }

    #[test]
    fn unknown_display_fields_survive_serialization() {
        let raw = json!({
            "id": 3,
            "title": "Tênis Adidas Duramo Lite 2.0",
            "price": 219.9,
            "image": "https://example.com/duramo.jpg",
            "amount": 2,
            "brand": "adidas"
        });

        let p: Product = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(p.extra.get("brand"), Some(&json!("adidas")));
        assert_eq!(serde_json::to_value(&p).unwrap(), raw);
    }
}
