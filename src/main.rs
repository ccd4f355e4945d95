use axum::{extract::DefaultBodyLimit, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use clearance_api::auth::password;
use clearance_api::config;
use clearance_api::middleware::auth::jwt_auth_middleware;
use clearance_api::store::ClearanceStore;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up JWT_SECRET, UPLOAD_DIR, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting clearance API in {:?} mode", config.environment);

    let store = ClearanceStore::new();
    seed_admin(&store).await;

    let app = app(store);

    // Allow tests or deployments to override port via env
    let port = std::env::var("CLEARANCE_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("clearance API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

/// Seed the admin login from environment configuration. Without configured
/// credentials no admin exists; nothing is ever baked in.
async fn seed_admin(store: &ClearanceStore) {
    let admin = &config::config().admin;
    match (&admin.username, &admin.password) {
        (Some(username), Some(pass)) => {
            let hash = password::hash_password(pass).expect("failed to hash admin password");
            store
                .seed_admin(username, hash, &admin.display_name)
                .await
                .expect("failed to seed admin account");
            tracing::info!(admin = %username, "admin account seeded");
        }
        _ => {
            tracing::warn!(
                "CLEARANCE_ADMIN_USERNAME/CLEARANCE_ADMIN_PASSWORD not set; no admin account exists"
            );
        }
    }
}

fn app(store: ClearanceStore) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        // Protected API behind the session middleware
        .merge(api_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(
            config::config().api.max_request_size_bytes,
        ))
        .with_state(store)
}

fn auth_public_routes() -> Router<ClearanceStore> {
    use axum::routing::post;
    use clearance_api::handlers::public::auth;

    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
}

fn api_routes() -> Router<ClearanceStore> {
    use axum::routing::{delete, post, put};
    use clearance_api::handlers::protected::{
        clearance, export, me, requirements, signature, students,
    };

    Router::new()
        // Requirement catalog
        .route(
            "/api/requirements",
            get(requirements::list)
                .post(requirements::create)
                .delete(requirements::clear),
        )
        .route("/api/requirements/:id", delete(requirements::remove))
        // Student registry and completion matrix
        .route("/api/students", get(students::list))
        .route(
            "/api/students/:id/completions/:requirement_id",
            put(students::set_completion),
        )
        // Clearance workflow
        .route(
            "/api/students/:id/clearance",
            post(clearance::submit).delete(clearance::undo),
        )
        .route("/api/clearances", get(clearance::list_submitted))
        .route("/api/clearances/export", get(export::download))
        // Signature template
        .route(
            "/api/signature",
            get(signature::current).post(signature::upload),
        )
        .route("/api/signature/file", get(signature::file))
        // Student self-view
        .route("/api/me", get(me::me))
        .layer(axum::middleware::from_fn(jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Clearance API",
            "version": version,
            "description": "Student clearance tracking API built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/auth/login, /auth/register (public)",
                "requirements": "/api/requirements[/:id] (protected)",
                "students": "/api/students (protected)",
                "completions": "/api/students/:id/completions/:requirement_id (protected)",
                "clearance": "/api/students/:id/clearance, /api/clearances[/export] (protected)",
                "signature": "/api/signature[/file] (protected)",
                "me": "/api/me (protected, student session)",
            }
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}
