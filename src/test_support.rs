//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::config::ResolvedConfig;
use crate::core::state::App;

/// A fixed config so command-construction tests don't depend on the
/// environment or the home directory.
pub fn test_config() -> ResolvedConfig {
    ResolvedConfig {
        email: "dev@example.com".to_string(),
        key_path: "/tmp/test_id_rsa".to_string(),
        github_host: "github.com".to_string(),
        gitea_host: None,
        remote: "origin".to_string(),
        branch: "main".to_string(),
    }
}

/// Creates a test App on the main menu with the fixed test config.
pub fn test_app() -> App {
    App::from_config(&test_config())
}
