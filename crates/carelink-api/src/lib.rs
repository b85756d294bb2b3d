//! # carelink-api
//!
//! HTTP surface for CareLink: the per-request session gate, the
//! login/refresh/logout collaborators around the session authority, and
//! the admin session endpoints.

pub mod cookie;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod verifier;

pub use router::build_router;
pub use state::AppState;
