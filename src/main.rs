use std::net::SocketAddr;

use storefront_api::{app::app, config, db, state::AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting storefront API in {:?} mode", config.environment);

    let pool = db::connect(&config.database)
        .await
        .unwrap_or_else(|e| panic!("database connection failed: {}", e));

    db::run_migrations(&pool)
        .await
        .unwrap_or_else(|e| panic!("migration failed: {}", e));

    let app = app(AppState::new(pool));

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Storefront API listening on http://{}", bind_addr);

    // connect-info wiring is what lets the rate limiter see peer addresses
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("server");
}
