//! Utility modules
//!
//! This module contains common utilities used throughout the application,
//! including error handling, logging setup, API responses and helper functions.

pub mod errors;
pub mod logging;
pub mod helpers;
pub mod response;

pub use errors::{ClubPortalError, Result};
