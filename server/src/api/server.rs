//! API server initialization

use std::net::SocketAddr;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::response::Redirect;
use axum::routing::get;
use tokio::net::TcpListener;

use tower_http::compression::CompressionLayer;

use super::middleware::{self, IdentityState, resolve_identity};
use super::openapi::{openapi_json, swagger_ui_html};
use super::routes::{health, ingredients, links, recipes, tags, users};
use crate::core::CoreApp;
use crate::core::constants::{DEFAULT_BODY_LIMIT, RECIPE_BODY_LIMIT, SHORT_LINK_PREFIX};

pub struct ApiServer {
    app: CoreApp,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        Self { app }
    }

    /// Returns CoreApp for graceful shutdown
    pub async fn start(self) -> Result<CoreApp> {
        let Self { app } = self;

        // Clone shutdown before moving app
        let shutdown = app.shutdown.clone();

        let host = app.config.server.host.clone();
        let port = app.config.server.port;
        let addr = SocketAddr::new(host.parse()?, port);

        let public_base_url = app.config.server.public_base_url();

        let identity_state = IdentityState {
            catalog: app.catalog.clone(),
        };

        // Recipe writes carry inline base64 images, so they get a larger body cap
        let recipes_routes = recipes::routes(app.catalog.clone(), public_base_url)
            .layer(DefaultBodyLimit::max(RECIPE_BODY_LIMIT));

        // Every area below reads the caller identity from request extensions,
        // so the resolver middleware must wrap all of them
        let api_routes = Router::new()
            .nest("/api/v1/users", users::routes(app.catalog.clone()))
            .nest(
                "/api/v1/ingredients",
                ingredients::routes(app.catalog.clone()),
            )
            .nest("/api/v1/tags", tags::routes(app.catalog.clone()))
            .nest("/api/v1/recipes", recipes_routes)
            .layer(axum::middleware::from_fn_with_state(
                identity_state,
                resolve_identity,
            ));

        let router = Router::new()
            .route("/", get(|| async { Redirect::temporary("/api/docs") }))
            .merge(health::routes(app.database.clone()))
            .route("/api/openapi.json", get(openapi_json))
            .route("/api/docs", get(swagger_ui_html))
            .route("/api/docs/", get(swagger_ui_html))
            .nest(SHORT_LINK_PREFIX, links::routes(app.catalog.clone()))
            .merge(api_routes)
            .fallback(middleware::handle_404)
            .layer(CompressionLayer::new())
            .layer(middleware::cors(&host, port))
            .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT));

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        Ok(app)
    }
}
