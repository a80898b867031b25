//! YugaByte node command composer
//!
//! Turns a node lifecycle intent (provision, configure, control, list,
//! destroy) into the ordered argument list for the devops `instance`
//! command, parameterized by cloud provider, region, access key, storage
//! layout and software/config variant. Nothing is executed here: finished
//! invocations are handed to a `DevopsExecutor`.
//!
//! The system is organized into functional modules:
//! - **error**: Unified error type hierarchy
//! - **models**: Parameter bundles and platform records
//! - **config**: `application.toml` settings (devops home, docker network)
//! - **inventory**: Read-only universe / access key / node instance / release lookups
//! - **node**: Command dispatcher and the cloud, access, device and configure builders
//! - **log_collector**: `log` backend used by the binary

// Core foundational modules
pub mod error;
pub mod models;

pub mod config;
pub mod inventory;
pub mod node;

pub mod log_collector;

// Re-export the log crate for macro usage
pub use log;

// ============================================================================
// PUBLIC RE-EXPORTS FOR CONVENIENCE
// ============================================================================

pub use error::{ConfigError, NodeCommandError, ReleaseError, Result};

pub use models::{
    AccessKey, AvailabilityZone, CloudType, ConfigureKind, ConfigureParams, ControlParams,
    DestroyParams, DeviceInfo, KeyInfo, ListParams, MasterAddress, NodeCommandType, NodeDetails,
    NodeInstance, NodeTaskParams, ProvisionParams, Region, ServerType, Universe,
    UpgradeTaskSubType, UserIntent,
};

pub use config::DevopsConfig;

pub use inventory::{Inventory, ReleaseCatalog, ReleaseManager, StaticInventory};

pub use node::{
    command_args, compose_node_command, CommandContext, DevopsExecutor, DryRunExecutor,
    NodeInvocation, NodeManager, ShellResponse,
};

pub use log_collector::LogCollector;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
