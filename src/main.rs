use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use impetus_hub::handlers;
use impetus_hub::middleware::require_user;
use impetus_hub::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up WEBHOOK_URL, HUB_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = impetus_hub::config::config();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "impetus_hub=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting Impetus Hub in {:?} mode", config.environment);
    if config.webhook.url.is_empty() {
        tracing::warn!("WEBHOOK_URL is not set; automation triggers will fail until it is");
    }

    let state = AppState::from_config(config);
    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("HUB_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Impetus Hub server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes(state.clone()))
        // Protected API behind the identity gate
        .merge(api_routes(state))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn auth_public_routes(state: AppState) -> Router {
    use axum::routing::post;

    Router::new()
        .route("/auth/login", post(handlers::auth::login_post))
        .route("/auth/signup", post(handlers::auth::signup_post))
        .with_state(state)
}

fn api_routes(state: AppState) -> Router {
    use axum::routing::{delete, post, put};

    Router::new()
        // Automation catalog and triggers
        .route("/api/automations", get(handlers::automations::automation_list))
        .route(
            "/api/automations/duplicate-drive",
            post(handlers::automations::duplicate_drive_post),
        )
        // Current user
        .route("/api/profile", get(handlers::profile::profile_get))
        // Session management for authenticated users
        .route("/api/auth/session", delete(handlers::auth::session_delete))
        .route("/api/auth/password", put(handlers::auth::password_put))
        .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_user))
        .with_state(state)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Impetus Hub",
            "version": version,
            "description": "Internal operations hub - webhook-triggered automations",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "auth": "/auth/login, /auth/signup (public - token acquisition)",
                "session": "/api/auth/session, /api/auth/password (protected)",
                "automations": "/api/automations[/duplicate-drive] (protected)",
                "profile": "/api/profile (protected)",
            }
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    let now = chrono::Utc::now();
    let webhook_configured = !impetus_hub::config::config().webhook.url.is_empty();

    axum::response::Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": now,
            "webhook": if webhook_configured { "configured" } else { "missing" }
        }
    }))
}
