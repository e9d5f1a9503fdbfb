use std::{net::SocketAddr, sync::Arc};

use rocketcart::{
    config, routes,
    services::{
        api::ApiClient,
        cart_service::CartStore,
        storage::FileStorage,
    },
    AppState,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let settings = config::load();

    let api = Arc::new(ApiClient::new(settings.api_url.clone()));
    let storage = Arc::new(FileStorage::new(settings.storage_path.clone()));
    let (events_tx, _events_rx) = tokio::sync::broadcast::channel(64);

    let cart = CartStore::load(api, storage, settings.storage_key.clone(), events_tx).await;
    tracing::info!("catalog at {}, cart stored in {}", settings.api_url, settings.storage_path);

    let state = AppState {
        settings: settings.clone(),
        cart: Arc::new(cart),
    };

    let ip = match settings.host.parse::<std::net::IpAddr>() {
        Ok(ip) => ip,
        Err(e) => {
            tracing::error!("invalid HOST {:?}: {}", settings.host, e);
            std::process::exit(1);
        }
    };
    let addr = SocketAddr::from((ip, settings.port));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("could not bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, routes::app(state)).await {
        tracing::error!("server stopped: {}", e);
    }
}
