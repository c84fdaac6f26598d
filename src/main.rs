use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use lixozero_rust::{
    api, AppConfig, AppStore, GeminiGateway, InventoryService, ShoppingListService,
};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Local-time log format
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // Load configuration
    let config = AppConfig::from_env();
    info!("Starting server with config: {:?}", config);

    // Shared store + services
    let store = Arc::new(RwLock::new(AppStore::default()));
    let gateway = Arc::new(GeminiGateway::new(&config.gateway)?);
    let inventory_service = Arc::new(InventoryService::new(gateway, Arc::clone(&store)));
    let shopping_service = Arc::new(ShoppingListService::new(Arc::clone(&store)));

    // Periodic expiry sweep (mutations also sweep reactively)
    let sweeper = Arc::clone(&inventory_service);
    let sweep_interval = Duration::from_secs(config.sweep.interval_secs);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        loop {
            ticker.tick().await;
            let expired = sweeper.sweep().await;
            if expired > 0 {
                info!(expired, "periodic expiry sweep");
            }
        }
    });

    // Build routes
    let inventory_routes = Router::new()
        .route("/api/inventory", get(api::list_inventory))
        .route("/api/inventory/register", post(api::register_text))
        .route("/api/inventory/register/photo", post(api::register_photo))
        .route("/api/inventory/consume", post(api::consume))
        .route("/api/inventory/:id/spoiled", post(api::mark_spoiled))
        .route("/api/stats/waste", get(api::waste_stats))
        .route("/api/profile", get(api::get_profile).put(api::update_profile))
        .with_state(inventory_service);

    let shopping_routes = Router::new()
        .route(
            "/api/shopping",
            get(api::shopping_list)
                .post(api::manual_add)
                .delete(api::clear_shopping_list),
        )
        .route("/api/shopping/export", get(api::export_shopping_list))
        .route("/api/shopping/:id", delete(api::remove_shopping_item))
        .route("/api/shopping/:id/quantity", post(api::adjust_quantity))
        .route("/api/shopping/:id/priority", post(api::set_priority))
        .with_state(shopping_service);

    let app = Router::new()
        .route("/health", get(api::health_check))
        .merge(inventory_routes)
        .merge(shopping_routes)
        .layer(ServiceBuilder::new());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /api/inventory/register        - Register groceries from text");
    info!("  POST /api/inventory/register/photo  - Register groceries from a photo");
    info!("  POST /api/inventory/consume         - Reconcile a consumption statement");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
