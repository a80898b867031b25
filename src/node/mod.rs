//! Node command composition.
//!
//! Translates a node lifecycle action plus its parameter bundle into the
//! ordered argument list for the devops `instance` command:
//!
//! ```text
//! (action, params) -> validate variant
//!                  -> action-specific args (configure / access / device)
//!                  -> node name
//!                  -> + cloud-context args -> NodeInvocation -> DevopsExecutor
//! ```
//!
//! Composition is pure apart from read-only lookups: the same inputs always
//! produce the same invocation, and any failure yields no invocation at all.

pub mod access;
pub mod cloud;
pub mod configure;
pub mod device;
pub mod executor;

use crate::config::DevopsConfig;
use crate::error::NodeCommandError;
use crate::inventory::{Inventory, ReleaseCatalog};
use crate::models::{CloudType, NodeCommandType, NodeDetails, NodeTaskParams, Universe};
use std::sync::Arc;

pub use access::access_args;
pub use cloud::cloud_args;
pub use configure::configure_args;
pub use device::device_args;
pub use executor::{DevopsExecutor, DryRunExecutor, NodeInvocation, ShellResponse, INSTANCE_COMMAND_TYPE};

/// Read-only collaborators for a single composition call.
#[derive(Clone, Copy)]
pub struct CommandContext<'a> {
    pub inventory: &'a dyn Inventory,
    pub releases: &'a dyn ReleaseCatalog,
    pub config: &'a DevopsConfig,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        inventory: &'a dyn Inventory,
        releases: &'a dyn ReleaseCatalog,
        config: &'a DevopsConfig,
    ) -> Self {
        CommandContext {
            inventory,
            releases,
            config,
        }
    }
}

/// Resolve the universe a node task belongs to.
pub(crate) fn resolve_universe(
    node: &NodeDetails,
    inventory: &dyn Inventory,
) -> Result<Universe, NodeCommandError> {
    let uuid = node.universe_uuid.ok_or_else(|| {
        NodeCommandError::MissingReference(format!(
            "node task for {} is missing its universe UUID",
            node.node_name
        ))
    })?;
    inventory
        .universe(&uuid)
        .ok_or_else(|| NodeCommandError::NotFound(format!("universe {}", uuid)))
}

/// Build the action argument list, node name last.
pub fn command_args(
    action: NodeCommandType,
    params: &NodeTaskParams,
    ctx: &CommandContext<'_>,
) -> Result<Vec<String>, NodeCommandError> {
    let actual = params.command_type();
    if actual != action {
        return Err(NodeCommandError::TypeMismatch {
            expected: action.verb().to_string(),
            actual: actual.verb().to_string(),
        });
    }

    let node = params.node();
    if node.node_name.trim().is_empty() {
        return Err(NodeCommandError::MissingReference(
            "node task has no node name".to_string(),
        ));
    }

    let mut args = Vec::new();

    match params {
        NodeTaskParams::Provision(p) => {
            if node.cloud != CloudType::Onprem {
                let image = node
                    .region
                    .yb_image
                    .as_deref()
                    .filter(|image| !image.is_empty())
                    .ok_or_else(|| {
                        NodeCommandError::MissingReference(format!(
                            "region {} has no machine image",
                            node.region.code
                        ))
                    })?;
                args.push("--instance_type".to_string());
                args.push(p.instance_type.clone());
                args.push("--cloud_subnet".to_string());
                args.push(p.subnet_id.clone());
                args.push("--machine_image".to_string());
                args.push(image.to_string());
                args.push("--assign_public_ip".to_string());
            }
            args.extend(access_args(params, ctx.inventory)?);
        }
        NodeTaskParams::Configure(p) => {
            args.extend(configure_args(p, ctx.inventory, ctx.releases)?);
            args.extend(access_args(params, ctx.inventory)?);
        }
        NodeTaskParams::List(_) => {
            args.push("--as_json".to_string());
        }
        NodeTaskParams::Destroy(_) => {}
        NodeTaskParams::Control(p) => {
            args.push(p.process.clone());
            args.push(p.command.clone());
            args.extend(access_args(params, ctx.inventory)?);
        }
    }

    // Storage layout always follows the action and credential arguments.
    if let Some(device_info) = params.device_info() {
        args.extend(device_args(device_info));
    }

    args.push(node.node_name.clone());
    Ok(args)
}

/// Compose the complete invocation for `action` without executing it.
pub fn compose_node_command(
    action: NodeCommandType,
    params: &NodeTaskParams,
    ctx: &CommandContext<'_>,
) -> Result<NodeInvocation, NodeCommandError> {
    let args = command_args(action, params, ctx)?;
    let node = params.node();
    let cloud_args = cloud_args(node, ctx.inventory, ctx.config)?;

    Ok(NodeInvocation {
        cloud: node.cloud,
        region_uuid: node.region.uuid,
        region_code: node.region.code.clone(),
        command_type: INSTANCE_COMMAND_TYPE.to_string(),
        verb: action.verb().to_string(),
        args,
        cloud_args,
    })
}

/// Node command front door: owns the collaborators and hands finished
/// invocations to the executor.
pub struct NodeManager {
    inventory: Arc<dyn Inventory>,
    releases: Arc<dyn ReleaseCatalog>,
    config: DevopsConfig,
    executor: Arc<dyn DevopsExecutor>,
}

impl NodeManager {
    pub fn new(
        inventory: Arc<dyn Inventory>,
        releases: Arc<dyn ReleaseCatalog>,
        config: DevopsConfig,
        executor: Arc<dyn DevopsExecutor>,
    ) -> Self {
        NodeManager {
            inventory,
            releases,
            config,
            executor,
        }
    }

    pub fn config(&self) -> &DevopsConfig {
        &self.config
    }

    fn context(&self) -> CommandContext<'_> {
        CommandContext::new(self.inventory.as_ref(), self.releases.as_ref(), &self.config)
    }

    /// Compose the invocation for `action` from `params`.
    pub fn compose(
        &self,
        action: NodeCommandType,
        params: &NodeTaskParams,
    ) -> Result<NodeInvocation, NodeCommandError> {
        let node_name = &params.node().node_name;
        match compose_node_command(action, params, &self.context()) {
            Ok(invocation) => {
                log::info!(
                    "[NodeManager] Composed {} for node {}: {} args, {} cloud args",
                    action,
                    node_name,
                    invocation.args.len(),
                    invocation.cloud_args.len()
                );
                Ok(invocation)
            }
            Err(e) => {
                log::warn!(
                    "[NodeManager] Failed to compose {} for node {}: {}",
                    action,
                    node_name,
                    e
                );
                Err(e)
            }
        }
    }

    /// Compose and hand off to the executor, scoped to the node's region.
    pub fn node_command(
        &self,
        action: NodeCommandType,
        params: &NodeTaskParams,
    ) -> Result<ShellResponse, NodeCommandError> {
        let invocation = self.compose(action, params)?;
        let response = self.executor.exec_command(&invocation);
        log::debug!(
            "[NodeManager] {} for node {} returned code {}",
            action,
            params.node().node_name,
            response.code
        );
        Ok(response)
    }
}
