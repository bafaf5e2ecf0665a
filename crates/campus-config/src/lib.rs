//! Configuration management for the campus access layer
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. Environment variables (CAMPUS_* prefix, `__` between sections)
//! 2. campus.local.toml (gitignored, local overrides)
//! 3. campus.toml (git-tracked, project config)
//! 4. ~/.config/campus/config.toml (user defaults)
//! 5. Built-in defaults (lowest precedence)
//!
//! Built-in defaults reproduce the standard capability table exactly; a
//! `[capabilities]` section only replaces the entries it names.

use anyhow::Result;
use campus_rbac::navigation::{DEFAULT_FALLBACK_PATH, DEFAULT_LOGIN_PATH, standard_routes};
use campus_rbac::{AccessEnforcer, Capability, CapabilityTable, Role, RoleSet, Router};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Main campus access configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampusConfig {
    pub enforcement: EnforcementConfig,
    pub navigation: NavigationConfig,
    /// Capability overrides: capability name → allowed role names.
    pub capabilities: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnforcementConfig {
    /// Log every enforcement decision.
    pub audit: bool,
}

impl Default for EnforcementConfig {
    fn default() -> Self {
        Self { audit: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub login_path: String,
    pub fallback_path: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            fallback_path: DEFAULT_FALLBACK_PATH.to_string(),
        }
    }
}

impl CampusConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Reads and validates a single policy file, without merging any other
    /// source.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Resolves the capability table: the standard table with overrides applied.
    ///
    /// Override names must be exact (`"manage-courses"`, `"TEACHER"`). An
    /// override with no roles is rejected; remove the entry instead.
    pub fn capability_table(&self) -> Result<CapabilityTable, ConfigError> {
        let mut table = CapabilityTable::STANDARD;

        for (name, role_names) in &self.capabilities {
            let capability: Capability = name.parse()?;
            if role_names.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "capability '{capability}' must allow at least one role"
                )));
            }

            let roles = role_names
                .iter()
                .map(|role| role.parse::<Role>())
                .collect::<Result<RoleSet, _>>()?;
            table = table.with_allowed(capability, roles);
        }

        Ok(table)
    }

    /// Checks the whole configuration without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.capability_table()?;

        for (key, path) in [
            ("login_path", &self.navigation.login_path),
            ("fallback_path", &self.navigation.fallback_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::ValidationError(format!(
                    "navigation.{key} must be an absolute path, got {path:?}"
                )));
            }
        }

        if self.navigation.login_path == self.navigation.fallback_path {
            return Err(ConfigError::ValidationError(
                "navigation.login_path and navigation.fallback_path must differ".to_string(),
            ));
        }

        Ok(())
    }

    /// Builds an enforcer over the resolved capability table.
    pub fn enforcer(&self) -> Result<AccessEnforcer, ConfigError> {
        let enforcer = AccessEnforcer::new(self.capability_table()?);
        Ok(if self.enforcement.audit {
            enforcer
        } else {
            enforcer.without_audit()
        })
    }

    /// Builds a router over the standard page table, with the configured
    /// login page substituted for the standard one.
    pub fn router(&self) -> Router {
        let routes = standard_routes()
            .into_iter()
            .map(|mut route| {
                if route.path == DEFAULT_LOGIN_PATH {
                    route.path.clone_from(&self.navigation.login_path);
                }
                route
            })
            .collect();

        Router::new(
            routes,
            self.navigation.login_path.clone(),
            self.navigation.fallback_path.clone(),
        )
    }
}
