//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.gitup/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GitupConfig {
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub ssh: SshConfig,
    #[serde(default)]
    pub git: GitConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct IdentityConfig {
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SshConfig {
    pub key_path: Option<String>,
    pub github_host: Option<String>,
    pub gitea_host: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GitConfig {
    pub remote: Option<String>,
    pub branch: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_EMAIL: &str = "your_email@example.com";
pub const DEFAULT_KEY_PATH: &str = "~/.ssh/id_rsa";
pub const DEFAULT_GITHUB_HOST: &str = "github.com";
pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_BRANCH: &str = "main";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Comment baked into generated keys (ssh-keygen -C).
    pub email: String,
    /// Default key file for generation and ssh-add.
    pub key_path: String,
    pub github_host: String,
    /// None means the Gitea host is prompted for when needed.
    pub gitea_host: Option<String>,
    pub remote: String,
    pub branch: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.gitup/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".gitup").join("config.toml"))
}

/// Load config from `override_path`, or from `~/.gitup/config.toml`.
///
/// With an explicit override, a missing file is an error. At the default
/// location, a missing file generates a commented-out default and returns
/// `GitupConfig::default()`. A malformed file returns `ConfigError::Parse`.
pub fn load_config(override_path: Option<&Path>) -> Result<GitupConfig, ConfigError> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => p,
            None => {
                warn!("Could not determine home directory, using default config");
                return Ok(GitupConfig::default());
            }
        },
    };

    if !path.exists() {
        if override_path.is_some() {
            return Err(ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("config file not found: {}", path.display()),
            )));
        }
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(GitupConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: GitupConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# gitup Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars.

# [identity]
# email = "your_email@example.com"   # Comment for generated keys (ssh-keygen -C)

# [ssh]
# key_path = "~/.ssh/id_rsa"         # Default key file for Generate Keys / Add Key to Agent
# github_host = "github.com"
# gitea_host = "gitea.example.com"   # Leave unset to be prompted

# [git]
# remote = "origin"                  # Used by Commit and Sync Changes
# branch = "main"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars.
pub fn resolve(config: &GitupConfig) -> ResolvedConfig {
    let email = std::env::var("GITUP_EMAIL")
        .ok()
        .or_else(|| config.identity.email.clone())
        .unwrap_or_else(|| DEFAULT_EMAIL.to_string());

    let key_path = std::env::var("GITUP_KEY_PATH")
        .ok()
        .or_else(|| config.ssh.key_path.clone())
        .unwrap_or_else(|| DEFAULT_KEY_PATH.to_string());

    let github_host = std::env::var("GITUP_GITHUB_HOST")
        .ok()
        .or_else(|| config.ssh.github_host.clone())
        .unwrap_or_else(|| DEFAULT_GITHUB_HOST.to_string());

    // No default here: an unset Gitea host is prompted for in the TUI.
    let gitea_host = std::env::var("GITUP_GITEA_HOST")
        .ok()
        .or_else(|| config.ssh.gitea_host.clone())
        .filter(|h| !h.is_empty());

    let remote = std::env::var("GITUP_REMOTE")
        .ok()
        .or_else(|| config.git.remote.clone())
        .unwrap_or_else(|| DEFAULT_REMOTE.to_string());

    let branch = std::env::var("GITUP_BRANCH")
        .ok()
        .or_else(|| config.git.branch.clone())
        .unwrap_or_else(|| DEFAULT_BRANCH.to_string());

    ResolvedConfig {
        email,
        key_path,
        github_host,
        gitea_host,
        remote,
        branch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = GitupConfig::default();
        assert!(config.identity.email.is_none());
        assert!(config.ssh.key_path.is_none());
        assert!(config.git.remote.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&GitupConfig::default());
        assert_eq!(resolved.email, DEFAULT_EMAIL);
        assert_eq!(resolved.key_path, DEFAULT_KEY_PATH);
        assert_eq!(resolved.github_host, DEFAULT_GITHUB_HOST);
        assert_eq!(resolved.gitea_host, None);
        assert_eq!(resolved.remote, DEFAULT_REMOTE);
        assert_eq!(resolved.branch, DEFAULT_BRANCH);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = GitupConfig {
            identity: IdentityConfig {
                email: Some("me@corp.example".to_string()),
            },
            ssh: SshConfig {
                key_path: Some("~/.ssh/work_rsa".to_string()),
                github_host: Some("github.corp.example".to_string()),
                gitea_host: Some("gitea.corp.example".to_string()),
            },
            git: GitConfig {
                remote: Some("upstream".to_string()),
                branch: Some("trunk".to_string()),
            },
        };
        let resolved = resolve(&config);
        assert_eq!(resolved.email, "me@corp.example");
        assert_eq!(resolved.key_path, "~/.ssh/work_rsa");
        assert_eq!(resolved.github_host, "github.corp.example");
        assert_eq!(resolved.gitea_host.as_deref(), Some("gitea.corp.example"));
        assert_eq!(resolved.remote, "upstream");
        assert_eq!(resolved.branch, "trunk");
    }

    #[test]
    fn test_empty_gitea_host_resolves_to_none() {
        let config = GitupConfig {
            ssh: SshConfig {
                gitea_host: Some(String::new()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(resolve(&config).gitea_host, None);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[identity]
email = "dev@example.com"

[ssh]
key_path = "~/.ssh/id_ed25519"
gitea_host = "git.example.org"

[git]
branch = "master"
"#;
        let config: GitupConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.identity.email.as_deref(), Some("dev@example.com"));
        assert_eq!(config.ssh.key_path.as_deref(), Some("~/.ssh/id_ed25519"));
        assert_eq!(config.ssh.gitea_host.as_deref(), Some("git.example.org"));
        assert!(config.ssh.github_host.is_none());
        assert_eq!(config.git.branch.as_deref(), Some("master"));
        assert!(config.git.remote.is_none());
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[git]
remote = "upstream"
"#;
        let config: GitupConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.git.remote.as_deref(), Some("upstream"));
        assert!(config.git.branch.is_none());
        assert!(config.identity.email.is_none());
        assert!(config.ssh.key_path.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result: Result<GitupConfig, _> = toml::from_str("[ssh\nkey_path = 3");
        assert!(result.is_err());
    }
}
