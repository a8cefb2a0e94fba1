//! HTTP handlers
//!
//! Thin adapters from requests to service calls; all rules live in the
//! services.

pub mod admin;
pub mod auth;
pub mod certificates;
pub mod events;
pub mod health;
pub mod registrations;

pub use health::health_check;
