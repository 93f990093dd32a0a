use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::{AppConfig, SecurityConfig};
use crate::database::{DatabaseManager, MemoryStore, PgProfileStore, ProfileStore};
use crate::github::{GithubClient, GithubError};
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::services::ProfileService;

/// Shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub profiles: ProfileService,
    pub github: GithubClient,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn ProfileStore>) -> Result<Self, GithubError> {
        let github = GithubClient::new(&config.github)?;
        Ok(Self {
            config: Arc::new(config),
            profiles: ProfileService::new(store),
            github,
        })
    }

    /// PostgreSQL when `DATABASE_URL` is configured, the in-memory store otherwise
    pub async fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn ProfileStore> = if config.database.url.is_some() {
            let pool = DatabaseManager::connect(&config.database).await?;
            let store = PgProfileStore::new(pool);
            store.ensure_schema().await?;
            Arc::new(store)
        } else {
            warn!("DATABASE_URL not set; profiles are kept in memory and lost on restart");
            Arc::new(MemoryStore::new())
        };

        Ok(Self::new(config, store)?)
    }
}

pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security);

    Router::new()
        // Public
        .route("/", get(public::system::root))
        .route("/health", get(public::system::health))
        .nest("/api/profile", profile_routes(state.clone()))
        // Global middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn profile_routes(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/", get(public::profile::list))
        .route("/user/:user_id", get(public::profile::by_user))
        .route("/github/:username", get(public::github::repos));

    let protected_routes = Router::new()
        .route("/", post(protected::profile::upsert).delete(protected::profile::delete))
        .route("/me", get(protected::profile::me))
        .route("/experience", put(protected::experience::add))
        .route("/experience/:exp_id", delete(protected::experience::remove))
        .route("/education", put(protected::education::add))
        .route("/education/:edu_id", delete(protected::education::remove))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    // Same path, different methods: merge combines the method routers
    public_routes.merge(protected_routes)
}

fn cors_layer(config: &SecurityConfig) -> CorsLayer {
    if !config.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        info!("No CORS origins configured; allowing any origin");
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
