//! # Body Guard
//!
//! axum middleware that validates a JSON request body against a root
//! declaration before the handler runs. Rejected bodies never reach the
//! handler; accepted bodies are handed on unchanged.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::Value;

use super::adapter::{validate_payload, AdapterError};
use super::config::GuardConfig;
use crate::schema::Declaration;

/// Shared state of the guard middleware
#[derive(Debug, Clone)]
pub struct GuardState {
    declaration: Arc<Declaration>,
    config: GuardConfig,
}

impl GuardState {
    pub fn new(declaration: Declaration, config: GuardConfig) -> Self {
        Self {
            declaration: Arc::new(declaration),
            config,
        }
    }

    pub fn declaration(&self) -> &Declaration {
        &self.declaration
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }
}

/// Middleware validating the request body.
///
/// Use with `axum::middleware::from_fn_with_state`, or through [`guard`].
pub async fn validate_body(State(state): State<GuardState>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    let bytes = match to_bytes(body, state.config.body_limit).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %parts.uri.path(), error = %e, "request body could not be read");
            return AdapterError::from_body_error(&e).into_response();
        }
    };

    let blank = bytes.iter().all(u8::is_ascii_whitespace);
    let payload: Option<Value> = if blank && state.config.empty_body_is_absent {
        None
    } else {
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(path = %parts.uri.path(), error = %e, "request body is not JSON");
                return AdapterError::MalformedJson(e.to_string()).into_response();
            }
        }
    };

    let outcome = validate_payload(&state.declaration, payload.as_ref(), Err, || Ok(()));
    match outcome {
        Ok(()) => {
            tracing::debug!(path = %parts.uri.path(), "payload accepted");
            next.run(Request::from_parts(parts, Body::from(bytes))).await
        }
        Err(rejection) => {
            tracing::info!(
                path = %parts.uri.path(),
                violations = rejection.errors.leaf_count(),
                "payload rejected"
            );
            rejection.into_response()
        }
    }
}

/// Guards every route of `router` with `declaration`.
pub fn guard<S>(router: Router<S>, declaration: Declaration, config: GuardConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let state = GuardState::new(declaration, config);
    router.route_layer(middleware::from_fn_with_state(state, validate_body))
}
