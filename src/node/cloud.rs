//! Cloud-context arguments, independent of the lifecycle action.

use crate::config::DevopsConfig;
use crate::error::NodeCommandError;
use crate::inventory::Inventory;
use crate::models::{CloudType, NodeDetails};

/// Build `--zone` plus the provider-specific `--network` / `--node_metadata` arguments.
pub fn cloud_args(
    node: &NodeDetails,
    inventory: &dyn Inventory,
    config: &DevopsConfig,
) -> Result<Vec<String>, NodeCommandError> {
    let mut args = vec!["--zone".to_string(), node.zone.code.clone()];

    match node.cloud {
        CloudType::Docker => {
            let network = config.docker_network().ok_or_else(|| {
                NodeCommandError::MissingConfiguration(
                    "yb.docker.network is not set in application.toml".to_string(),
                )
            })?;
            args.push("--network".to_string());
            args.push(network.to_string());
        }
        CloudType::Onprem => {
            let instance = inventory.node_instance(&node.node_name).ok_or_else(|| {
                NodeCommandError::NotFound(format!(
                    "on-prem node instance '{}'",
                    node.node_name
                ))
            })?;
            args.push("--node_metadata".to_string());
            args.push(instance.details_json());
        }
        CloudType::Aws | CloudType::Gcp | CloudType::Azu => {}
    }

    log::debug!(
        "[CloudArgs] {} cloud argument(s) for {} node {}",
        args.len(),
        node.cloud,
        node.node_name
    );
    Ok(args)
}
