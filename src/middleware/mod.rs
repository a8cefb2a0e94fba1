//! Middleware module
//!
//! This module contains middleware for request processing

pub mod auth;
pub mod cors;
pub mod rate_limit;

// Re-export commonly used middleware
pub use auth::{AdminSession, CurrentSession, MaybeSession};
pub use cors::create_cors_layer;
pub use rate_limit::LoginThrottle;
