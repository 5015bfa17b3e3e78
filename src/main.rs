use formrelay::application::context::AppContext;
use formrelay::config;
use formrelay::infrastructure::db::postgres::PostgresDatabase;
use formrelay::infrastructure::db::repositories::Repositories;
use formrelay::infrastructure::http::HttpDispatcher;
use formrelay::interface::http;
use formrelay::interface::http::state::AppState;
use formrelay::telemetry;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Step 1: Load configuration and initialize telemetry.
    let settings = config::load().expect("load config");
    telemetry::init_tracing(&settings.observability.service_name);
    let metrics = telemetry::init_metrics(settings.observability.enable_metrics);

    // Step 2: Connect to the database and apply migrations.
    let db = Arc::new(
        PostgresDatabase::connect(&settings.db.url, settings.db.max_connections)
            .await
            .expect("connect database"),
    );
    db.migrate().await.expect("run migrations");

    // Step 3: Build repositories and the outbound webhook client.
    let repos = Repositories::postgres(db.clone());
    let transport = HttpDispatcher::new(Duration::from_millis(
        settings.webhook_delivery.request_timeout_ms,
    ))
    .expect("build webhook client");

    // Step 4: Assemble shared application context and HTTP state.
    let ctx = AppContext::new(repos, Arc::new(transport), settings.clone());
    let state = AppState {
        ctx: Arc::new(ctx),
        metrics,
    };

    // Step 5: Build the HTTP app.
    let app = http::app(state);
    let bind_addr = format!("{}:{}", settings.server.host, settings.server.port);

    // Step 6: Bind and serve.
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("bind server");
    tracing::info!(addr = %bind_addr, "listening");

    axum::serve(listener, app).await.expect("serve");
}
