//! Configure sub-protocol: full install, software-only, or gflags-only.
//!
//! Every variant starts with the master address arguments, then appends the
//! arguments of exactly one [`ConfigureKind`] builder.

use super::resolve_universe;
use crate::error::NodeCommandError;
use crate::inventory::{Inventory, ReleaseCatalog};
use crate::models::{
    ConfigureKind, ConfigureParams, ServerType, UpgradeTaskSubType, PROCESS_TYPE_PROPERTY,
    TASK_SUB_TYPE_PROPERTY,
};
use std::str::FromStr;

/// Build the configure-specific arguments.
pub fn configure_args(
    params: &ConfigureParams,
    inventory: &dyn Inventory,
    releases: &dyn ReleaseCatalog,
) -> Result<Vec<String>, NodeCommandError> {
    let universe = resolve_universe(&params.node, inventory)?;
    let master_addresses = universe.master_addresses();
    if master_addresses.is_empty() {
        return Err(NodeCommandError::EmptyInput(format!(
            "universe {} has no master addresses",
            universe.uuid
        )));
    }

    let mut args = vec![
        "--master_addresses_for_tserver".to_string(),
        master_addresses.clone(),
    ];
    if !params.is_master_in_shell_mode {
        args.push("--master_addresses_for_master".to_string());
        args.push(master_addresses);
    }

    let kind_args = match params.kind {
        ConfigureKind::Everything => everything_args(params, releases)?,
        ConfigureKind::SoftwareOnly => software_args(params, releases)?,
        ConfigureKind::GFlagsOnly => gflags_args(params)?,
    };
    args.extend(kind_args);

    log::debug!(
        "[ConfigureArgs] {:?} for node {}: {} argument(s)",
        params.kind,
        params.node.node_name,
        args.len()
    );
    Ok(args)
}

fn everything_args(
    params: &ConfigureParams,
    releases: &dyn ReleaseCatalog,
) -> Result<Vec<String>, NodeCommandError> {
    let package = resolve_package(&params.yb_software_version, releases)?;
    Ok(vec!["--package".to_string(), package])
}

fn software_args(
    params: &ConfigureParams,
    releases: &dyn ReleaseCatalog,
) -> Result<Vec<String>, NodeCommandError> {
    let package = resolve_package(&params.yb_software_version, releases)?;
    let sub_type: UpgradeTaskSubType = required_property(params, TASK_SUB_TYPE_PROPERTY)?;
    Ok(vec![
        "--package".to_string(),
        package,
        "--tags".to_string(),
        sub_type.tag().to_string(),
    ])
}

fn gflags_args(params: &ConfigureParams) -> Result<Vec<String>, NodeCommandError> {
    let gflags = match &params.gflags {
        Some(gflags) if !gflags.is_empty() => gflags,
        _ => {
            return Err(NodeCommandError::EmptyInput(
                "empty gflags data provided".to_string(),
            ))
        }
    };
    let server_type: ServerType = required_property(params, PROCESS_TYPE_PROPERTY)?;

    let encoded = serde_json::Value::Object(
        gflags
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect(),
    )
    .to_string();

    Ok(vec![
        "--tags".to_string(),
        server_type.gflags_tag().to_string(),
        "--replace_gflags".to_string(),
        "--gflags".to_string(),
        encoded,
    ])
}

fn resolve_package(
    version: &str,
    releases: &dyn ReleaseCatalog,
) -> Result<String, NodeCommandError> {
    releases
        .release_by_version(version)
        .filter(|package| !package.is_empty())
        .ok_or_else(|| NodeCommandError::ReleaseNotFound(version.to_string()))
}

fn required_property<T: FromStr>(
    params: &ConfigureParams,
    name: &str,
) -> Result<T, NodeCommandError> {
    let invalid = |value: Option<&str>| NodeCommandError::InvalidProperty {
        name: name.to_string(),
        value: value.map(str::to_string),
    };
    let value = params.property(name).ok_or_else(|| invalid(None))?;
    value.parse::<T>().map_err(|_| invalid(Some(value)))
}
