//! Fault-injection middleware
//!
//! Intercepts every request outside a small allow-list and, with the
//! profile's configured probability, answers with a synthetic failure
//! instead of forwarding to the router. The decision is made exactly once
//! per request: a request either passes through untouched or terminates
//! here with an injected response.
//!
//! Requests that reach the decision point are tagged with a short random
//! correlation token first, so downstream log records carry it even on
//! pass-through.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use axum::{
    Json,
    body::Body,
    extract::Request,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use infrastructure::chaos::{ErrorKind, FaultProfile, FaultProfileError};
use rand::Rng;
use serde_json::{Value, json};
use tower::{Layer, Service};
use tracing::{Instrument, error, warn};

use super::request_id::{REQUEST_ID_HEADER, RequestId};

/// Paths that are never injected: root redirect, interactive docs, the
/// machine-readable schema, and the health check.
const EXEMPT_PATHS: [&str; 4] = ["/", "/docs", "/openapi.json", "/health"];

/// Check whether a path is exempt from injection
///
/// The docs UI loads assets from under `/docs/`, so the whole subtree is
/// exempt alongside the exact matches.
fn is_exempt(path: &str) -> bool {
    EXEMPT_PATHS.contains(&path) || path.starts_with("/docs/")
}

/// Per-request outcome of the injection decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    /// Terminate with a synthetic failure of the given kind
    Injected(ErrorKind),
    /// Forward to normal processing
    PassThrough,
}

/// Make the once-per-request decision from the profile
fn decide(profile: &FaultProfile) -> Decision {
    if profile.should_inject() {
        Decision::Injected(profile.select_kind())
    } else {
        Decision::PassThrough
    }
}

/// Artificial delay bounds in seconds for kinds that simulate slowness
const fn injected_delay_secs(kind: ErrorKind) -> Option<(f64, f64)> {
    match kind {
        ErrorKind::DatabaseTimeout => Some((2.0, 5.0)),
        ErrorKind::NetworkError => Some((1.0, 3.0)),
        _ => None,
    }
}

/// Build the synthetic response for an error kind
///
/// Pure mapping from `(kind, request_id)` to status and JSON body; the
/// delays and log records around an injection live in the middleware, not
/// here.
#[must_use]
pub fn fault_response(kind: ErrorKind, request_id: &str) -> (StatusCode, Value) {
    match kind {
        ErrorKind::DatabaseTimeout => (
            StatusCode::SERVICE_UNAVAILABLE,
            json!({"detail": "Database connection timeout - please try again later"}),
        ),
        ErrorKind::ValidationError => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({"detail": {
                "message": "Validation failed due to system constraints",
                "errors": [{"field": "random_validation", "message": "Simulated validation failure"}]
            }}),
        ),
        ErrorKind::AuthError => (
            StatusCode::UNAUTHORIZED,
            json!({"detail": "Authentication required - token expired or invalid"}),
        ),
        ErrorKind::RateLimit => (
            StatusCode::TOO_MANY_REQUESTS,
            json!({"detail": "Rate limit exceeded - too many requests"}),
        ),
        ErrorKind::NetworkError => (
            StatusCode::BAD_GATEWAY,
            json!({"detail": "Upstream service unavailable"}),
        ),
        ErrorKind::InternalServer => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"detail": format!("Internal server error - correlation ID: {request_id}")}),
        ),
    }
}

/// Layer that adds fault injection to HTTP services
#[derive(Debug, Clone)]
pub struct FaultInjectionLayer {
    profile: Arc<FaultProfile>,
}

impl FaultInjectionLayer {
    /// Create a layer from a fault profile, validating it up front
    ///
    /// # Errors
    ///
    /// Returns the profile's validation error; a profile with a bad rate or
    /// weights that do not sum to 1.0 is a startup failure.
    pub fn new(profile: FaultProfile) -> Result<Self, FaultProfileError> {
        profile.validate()?;
        Ok(Self {
            profile: Arc::new(profile),
        })
    }
}

impl<S> Layer<S> for FaultInjectionLayer {
    type Service = FaultInjectionService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        FaultInjectionService {
            inner,
            profile: Arc::clone(&self.profile),
        }
    }
}

/// Service wrapper performing the per-request injection decision
#[derive(Debug, Clone)]
pub struct FaultInjectionService<S> {
    inner: S,
    profile: Arc<FaultProfile>,
}

impl<S> Service<Request<Body>> for FaultInjectionService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let path = request.uri().path().to_string();
        let mut inner = self.inner.clone();

        if is_exempt(&path) {
            return Box::pin(async move { inner.call(request).await });
        }

        // Tagged before the decision: pass-through log records carry the
        // token too.
        let request_id = RequestId::generate();
        request.extensions_mut().insert(request_id.clone());

        let method = request.method().to_string();
        let span = tracing::info_span!(
            "http_request",
            request_id = %request_id,
            method = %method,
            path = %path,
        );

        let profile = Arc::clone(&self.profile);

        Box::pin(
            async move {
                let mut response = match decide(&profile) {
                    Decision::Injected(kind) => {
                        inject_fault(kind, &request_id, &method, &path).await
                    },
                    Decision::PassThrough => inner.call(request).await?,
                };

                if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }
                Ok(response)
            }
            .instrument(span),
        )
    }
}

/// Produce an injected failure response, including its artificial delay
///
/// The delay uses `tokio::time::sleep`, so only this request's task
/// suspends; it always runs to completion once the decision is made.
async fn inject_fault(
    kind: ErrorKind,
    request_id: &RequestId,
    method: &str,
    path: &str,
) -> Response<Body> {
    if let Some((min, max)) = injected_delay_secs(kind) {
        let delay = Duration::from_secs_f64(rand::rng().random_range(min..=max));
        tokio::time::sleep(delay).await;
    }

    match kind {
        ErrorKind::DatabaseTimeout => {
            error!(request_id = %request_id, path, method, kind = %kind, "Database timeout simulated");
        },
        ErrorKind::ValidationError => {
            error!(request_id = %request_id, path, method, kind = %kind, "Validation error simulated");
        },
        ErrorKind::AuthError => {
            error!(request_id = %request_id, path, method, kind = %kind, "Authentication error simulated");
        },
        ErrorKind::RateLimit => {
            warn!(request_id = %request_id, path, method, kind = %kind, "Rate limit exceeded simulated");
        },
        ErrorKind::NetworkError => {
            error!(request_id = %request_id, path, method, kind = %kind, "Network error simulated");
        },
        ErrorKind::InternalServer => {
            error!(request_id = %request_id, path, method, kind = %kind, "Internal server error simulated");
        },
    }

    let (status, body) = fault_response(kind, request_id.as_str());
    warn!(
        status = status.as_u16(),
        detail = %body["detail"],
        "Injected synthetic error response"
    );

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exempt_paths_match_exactly() {
        assert!(is_exempt("/"));
        assert!(is_exempt("/docs"));
        assert!(is_exempt("/openapi.json"));
        assert!(is_exempt("/health"));
    }

    #[test]
    fn docs_assets_are_exempt() {
        assert!(is_exempt("/docs/swagger-ui.css"));
        assert!(is_exempt("/docs/swagger-ui-bundle.js"));
    }

    #[test]
    fn api_paths_are_not_exempt() {
        assert!(!is_exempt("/users/"));
        assert!(!is_exempt("/users/42"));
        assert!(!is_exempt("/healthcheck"));
        assert!(!is_exempt("/docsx"));
    }

    #[test]
    fn decision_follows_the_profile() {
        let always = FaultProfile::always(ErrorKind::RateLimit);
        assert_eq!(decide(&always), Decision::Injected(ErrorKind::RateLimit));

        let never = FaultProfile::never();
        assert_eq!(decide(&never), Decision::PassThrough);
    }

    #[test]
    fn fault_response_is_pure() {
        for kind in [
            ErrorKind::DatabaseTimeout,
            ErrorKind::ValidationError,
            ErrorKind::AuthError,
            ErrorKind::RateLimit,
            ErrorKind::InternalServer,
            ErrorKind::NetworkError,
        ] {
            let (status_a, body_a) = fault_response(kind, "abc12345");
            let (status_b, body_b) = fault_response(kind, "abc12345");
            assert_eq!(status_a, status_b);
            assert_eq!(body_a, body_b);
        }
    }

    #[test]
    fn fault_response_status_codes_match_the_kind_table() {
        let id = "abc12345";
        assert_eq!(fault_response(ErrorKind::DatabaseTimeout, id).0, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(fault_response(ErrorKind::ValidationError, id).0, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(fault_response(ErrorKind::AuthError, id).0, StatusCode::UNAUTHORIZED);
        assert_eq!(fault_response(ErrorKind::RateLimit, id).0, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(fault_response(ErrorKind::NetworkError, id).0, StatusCode::BAD_GATEWAY);
        assert_eq!(fault_response(ErrorKind::InternalServer, id).0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn every_fault_body_has_a_detail_key() {
        for kind in [
            ErrorKind::DatabaseTimeout,
            ErrorKind::ValidationError,
            ErrorKind::AuthError,
            ErrorKind::RateLimit,
            ErrorKind::InternalServer,
            ErrorKind::NetworkError,
        ] {
            let (_, body) = fault_response(kind, "abc12345");
            assert!(body.get("detail").is_some(), "{kind} body is missing detail");
        }
    }

    #[test]
    fn validation_body_nests_message_and_errors() {
        let (_, body) = fault_response(ErrorKind::ValidationError, "abc12345");
        let detail = &body["detail"];
        assert!(detail["message"].is_string());
        let errors = detail["errors"].as_array().unwrap();
        assert!(!errors.is_empty());
        assert!(errors[0]["field"].is_string());
        assert!(errors[0]["message"].is_string());
    }

    #[test]
    fn internal_server_body_carries_the_correlation_id() {
        let (_, body) = fault_response(ErrorKind::InternalServer, "deadbeef");
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.contains("deadbeef"));
    }

    #[test]
    fn only_slow_kinds_have_delays() {
        assert_eq!(injected_delay_secs(ErrorKind::DatabaseTimeout), Some((2.0, 5.0)));
        assert_eq!(injected_delay_secs(ErrorKind::NetworkError), Some((1.0, 3.0)));
        assert_eq!(injected_delay_secs(ErrorKind::RateLimit), None);
        assert_eq!(injected_delay_secs(ErrorKind::ValidationError), None);
        assert_eq!(injected_delay_secs(ErrorKind::AuthError), None);
        assert_eq!(injected_delay_secs(ErrorKind::InternalServer), None);
    }

    #[test]
    fn layer_rejects_invalid_profiles() {
        let bad = FaultProfile::with_rate(2.0);
        assert!(bad.is_err());

        let good = FaultInjectionLayer::new(FaultProfile::default());
        assert!(good.is_ok());
    }
}
