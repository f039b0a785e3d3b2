use axum::{
    body::Body,
    extract::State,
    http::{
        header::{self, HeaderValue},
        Method, Request, Response, StatusCode,
    },
    middleware::Next,
};
use tracing::debug;

use crate::app::AppState;

/// Resolve which origin (if any) may read the response.
/// Wildcard reflects the caller's origin outside production; otherwise the whitelist decides.
pub fn resolve_allowed_origin(
    allowed_origins: &[String],
    is_production: bool,
    origin: Option<&str>,
) -> Option<HeaderValue> {
    let origin = origin?;
    let has_wildcard = allowed_origins.iter().any(|o| o == "*");

    let allowed = if has_wildcard && !is_production {
        debug!("CORS: Reflecting origin for staging/dev: {}", origin);
        true
    } else {
        let listed = allowed_origins.iter().any(|o| o == origin);
        debug!("CORS: Origin {} in whitelist: {}", origin, listed);
        listed
    };

    if allowed {
        HeaderValue::from_str(origin).ok()
    } else {
        None
    }
}

/// Dynamic CORS middleware for browser clients of /check-link
pub async fn dynamic_cors_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response<Body> {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let allowed_origin = resolve_allowed_origin(
        &state.config.cors_allowed_origins,
        state.config.is_production(),
        origin.as_deref(),
    );

    // Handle preflight OPTIONS requests
    if req.method() == Method::OPTIONS {
        let mut response = Response::new(Body::empty());

        if let Some(allowed) = allowed_origin {
            let headers = response.headers_mut();
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, allowed);
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("GET, POST, OPTIONS"),
            );
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("content-type, accept, origin, x-requested-with"),
            );
            headers.insert(
                header::ACCESS_CONTROL_MAX_AGE,
                HeaderValue::from_static("3600"),
            );
        }

        *response.status_mut() = StatusCode::NO_CONTENT;
        return response;
    }

    let mut response = next.run(req).await;

    if let Some(allowed) = allowed_origin {
        response
            .headers_mut()
            .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, allowed);
        response
            .headers_mut()
            .insert(header::VARY, HeaderValue::from_static("Origin"));
    }

    response
}
