//! Configuration module for devops command composition.
//!
//! Holds the process-wide settings the composer reads: where the devops
//! scripts live, where release packages are kept, and the docker network
//! used for virtualized deployments.
//!
//! # Module Structure
//!
//! - `loader`: Handles loading and saving `application.toml`
//!
//! Settings are read-only once loaded. A missing docker network is kept as
//! `None` so the cloud-context build can reject it instead of guessing one.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default devops checkout location.
pub const DEFAULT_DEVOPS_HOME: &str = "/opt/yugabyte/devops";

/// Wrapper script invoked for every instance command, relative to devops home.
pub const YBCLOUD_SCRIPT: &str = "bin/ybcloud.sh";

/// Root of `application.toml`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevopsConfig {
    pub yb: YbSettings,
}

/// `[yb]` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YbSettings {
    pub devops_home: PathBuf,
    pub releases_path: Option<PathBuf>,
    pub docker: DockerSettings,
}

impl Default for YbSettings {
    fn default() -> Self {
        YbSettings {
            devops_home: PathBuf::from(DEFAULT_DEVOPS_HOME),
            releases_path: None,
            docker: DockerSettings::default(),
        }
    }
}

/// `[yb.docker]` table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerSettings {
    pub network: Option<String>,
}

impl DevopsConfig {
    /// `yb.docker.network`, ignoring blank values.
    pub fn docker_network(&self) -> Option<&str> {
        self.yb
            .docker
            .network
            .as_deref()
            .filter(|n| !n.trim().is_empty())
    }

    /// Builder-style setter for the docker network.
    pub fn with_docker_network(mut self, network: impl Into<String>) -> Self {
        self.yb.docker.network = Some(network.into());
        self
    }

    /// Absolute path of the ybcloud wrapper script.
    pub fn ybcloud_script(&self) -> PathBuf {
        self.yb.devops_home.join(YBCLOUD_SCRIPT)
    }
}
