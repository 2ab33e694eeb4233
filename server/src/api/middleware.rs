//! HTTP middleware (CORS, 404 handler, caller identity)

use std::sync::Arc;

use axum::Json;
use axum::extract::{Request, State};
use axum::http::{HeaderName, HeaderValue, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::api::types::ApiError;
use crate::core::constants::USER_ID_HEADER;
use crate::data::StoreError;
use crate::domain::CatalogService;

/// Create CORS layer for the configured bind address
pub fn cors(host: &str, port: u16) -> CorsLayer {
    let is_all = host == "0.0.0.0" || host == "::";

    // When binding to all interfaces or localhost, allow both localhost
    // and 127.0.0.1; otherwise use the configured host directly.
    let base_hosts: Vec<&str> = if is_all || host == "127.0.0.1" || host == "localhost" {
        vec!["localhost", "127.0.0.1"]
    } else {
        vec![host]
    };

    let mut origins: Vec<HeaderValue> = Vec::new();
    for h in &base_hosts {
        if let Ok(origin) = format!("http://{}:{}", h, port).parse() {
            origins.push(origin);
        }
        if let Ok(origin) = format!("http://{}", h).parse() {
            origins.push(origin);
        }
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            HeaderName::from_static(USER_ID_HEADER),
        ])
}

/// Handle 404 Not Found with logging
pub async fn handle_404(req: Request) -> impl IntoResponse {
    tracing::debug!(method = %req.method(), uri = %req.uri(), "[404] no matching route");
    ApiError::not_found("NOT_FOUND", "Resource not found")
}

// ============================================================================
// Identity
// ============================================================================

/// Resolved caller identity, inserted into request extensions by
/// `resolve_identity`. `None` is an anonymous caller.
#[derive(Debug, Clone, Copy)]
pub struct Identity(pub Option<i64>);

/// Shared state for the identity middleware
#[derive(Clone)]
pub struct IdentityState {
    pub catalog: Arc<CatalogService>,
}

/// Identity error response
#[derive(Debug)]
pub struct IdentityError {
    pub status: StatusCode,
    pub error: &'static str,
    pub code: &'static str,
    pub message: String,
}

impl IdentityError {
    pub fn malformed() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: "unauthorized",
            code: "IDENTITY_MALFORMED",
            message: format!("{} header must be a numeric user id", USER_ID_HEADER),
        }
    }

    pub fn unknown(user_id: i64) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: "unauthorized",
            code: "IDENTITY_UNKNOWN",
            message: format!("User {} does not exist", user_id),
        }
    }

    pub fn store(e: StoreError) -> Self {
        tracing::error!(error = %e, "Identity lookup failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: "internal_error",
            code: "INTERNAL",
            message: "Identity lookup failed".to_string(),
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.error,
            "code": self.code,
            "message": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

/// Identity middleware
///
/// The gateway in front of this service authenticates callers and forwards
/// the acting user as a numeric `x-user-id` header. No header means an
/// anonymous caller; a present header must name an existing user (anything
/// else is an upstream contract violation and rejected with 401).
///
/// Injects into request extensions:
/// - `Identity` - the resolved caller, read by `CurrentUser` / `MaybeUser`
pub async fn resolve_identity(
    State(state): State<IdentityState>,
    mut request: Request,
    next: Next,
) -> Result<Response, IdentityError> {
    let identity = match request.headers().get(USER_ID_HEADER) {
        None => Identity(None),
        Some(value) => {
            let user_id = value
                .to_str()
                .ok()
                .and_then(|raw| raw.trim().parse::<i64>().ok())
                .ok_or_else(IdentityError::malformed)?;

            match state.catalog.get_user(user_id, None).await {
                Ok(_) => Identity(Some(user_id)),
                Err(StoreError::NotFound { .. }) => return Err(IdentityError::unknown(user_id)),
                Err(e) => return Err(IdentityError::store(e)),
            }
        }
    };

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}
