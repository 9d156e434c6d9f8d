//! HTTP boundary for declarations
//!
//! The framework-facing side of validation:
//! - `validate_payload`: generic validator with failure/success continuations
//! - `BadRequest`: the structured 400 rejection
//! - `validate_body` / `guard`: axum middleware checking JSON request bodies
//!
//! # Usage
//!
//! ```ignore
//! use axum::{routing::post, Router};
//! use shapeguard::http::{guard, GuardConfig};
//! use shapeguard::schema::Declaration;
//!
//! let person = Declaration::shape([
//!     ("firstName", Declaration::string().required()),
//!     ("lastName", Declaration::string()),
//! ])
//! .required();
//!
//! let app = guard(Router::new().route("/people", post(create_person)), person, GuardConfig::default());
//! ```

mod adapter;
mod config;
mod guard;

pub use adapter::{validate_payload, AdapterError, BadRequest, ErrorResponse, BAD_REQUEST_MESSAGE};
pub use config::GuardConfig;
pub use guard::{guard, validate_body, GuardState};
