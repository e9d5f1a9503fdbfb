use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub storage_path: String,
    pub storage_key: String,
    pub host: String,
    pub port: u16,
}

pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let api_url = env::var("CART_API_URL")
        .unwrap_or_else(|_| "http://localhost:3333".to_string());

    let storage_path = env::var("CART_STORAGE_PATH")
        .unwrap_or_else(|_| "data/local_storage.json".to_string());

    let storage_key = env::var("CART_STORAGE_KEY")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());

    let host = env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    Settings {
        api_url,
        storage_path,
        storage_key,
        host,
        port,
    }
}
