//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::state::App;

/// Creates an App with built-in defaults, independent of any config file.
pub fn test_app() -> App {
    App::new()
}
