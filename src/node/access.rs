//! Access-credential and security-group arguments.

use super::resolve_universe;
use crate::error::NodeCommandError;
use crate::inventory::Inventory;
use crate::models::NodeTaskParams;

/// Build the credential arguments for the universe's configured access key.
///
/// Returns nothing when the universe has no access key. Key pair and security
/// group are only added for provisioning.
pub fn access_args(
    params: &NodeTaskParams,
    inventory: &dyn Inventory,
) -> Result<Vec<String>, NodeCommandError> {
    let node = params.node();
    let universe = resolve_universe(node, inventory)?;

    let Some(key_code) = universe.access_key_code() else {
        log::debug!(
            "[AccessArgs] Universe {} has no access key, no credentials needed",
            universe.uuid
        );
        return Ok(Vec::new());
    };

    let access_key = inventory
        .access_key(&node.provider_uuid, key_code)
        .ok_or_else(|| {
            NodeCommandError::NotFound(format!(
                "access key '{}' for provider {}",
                key_code, node.provider_uuid
            ))
        })?;
    let key_info = &access_key.key_info;

    let mut args = Vec::new();

    if let Some(vault_file) = &key_info.vault_file {
        let vault_password_file = key_info.vault_password_file.as_ref().ok_or_else(|| {
            NodeCommandError::MissingReference(format!(
                "access key '{}' has a vault file but no vault password file",
                key_code
            ))
        })?;
        args.push("--vars_file".to_string());
        args.push(vault_file.clone());
        args.push("--vault_password_file".to_string());
        args.push(vault_password_file.clone());
    }

    if let Some(private_key) = &key_info.private_key {
        args.push("--private_key_file".to_string());
        args.push(private_key.clone());

        if params.is_provision() {
            args.push("--key_pair_name".to_string());
            args.push(key_code.to_string());
            args.push("--security_group".to_string());
            args.push(security_group_name(&node.region.code));
        }
    }

    log::debug!(
        "[AccessArgs] {} credential argument(s) from key '{}'",
        args.len(),
        key_code
    );
    Ok(args)
}

/// Security group created per region at provision time.
pub fn security_group_name(region_code: &str) -> String {
    format!("yb-{}-sg", region_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::StaticInventory;
    use crate::models::{
        AccessKey, AvailabilityZone, CloudType, ControlParams, KeyInfo, ListParams, NodeDetails,
        ProvisionParams, Region, Universe, UserIntent,
    };
    use uuid::Uuid;

    fn node(universe_uuid: Option<Uuid>) -> NodeDetails {
        NodeDetails {
            cloud: CloudType::Aws,
            provider_uuid: Uuid::from_u128(1),
            region: Region {
                uuid: Uuid::nil(),
                code: "us-west-1".to_string(),
                name: String::new(),
                yb_image: Some("ami-1".to_string()),
            },
            zone: AvailabilityZone {
                uuid: Uuid::nil(),
                code: "us-west-1a".to_string(),
                name: String::new(),
            },
            node_name: "n1".to_string(),
            universe_uuid,
        }
    }

    fn inventory_with_key(key_info: KeyInfo) -> (StaticInventory, Uuid) {
        let universe_uuid = Uuid::from_u128(42);
        let inventory = StaticInventory::new()
            .with_universe(Universe {
                uuid: universe_uuid,
                name: "u".to_string(),
                user_intent: Some(UserIntent {
                    access_key_code: Some("yb-key".to_string()),
                }),
                masters: vec![],
            })
            .with_access_key(AccessKey {
                key_code: "yb-key".to_string(),
                provider_uuid: Uuid::from_u128(1),
                key_info,
            });
        (inventory, universe_uuid)
    }

    fn private_key_only() -> KeyInfo {
        KeyInfo {
            private_key: Some("/keys/yb-key.pem".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_universe_uuid() {
        let params = NodeTaskParams::List(ListParams { node: node(None) });
        let result = access_args(&params, &StaticInventory::new());
        assert!(matches!(result, Err(NodeCommandError::MissingReference(_))));
    }

    #[test]
    fn test_no_access_key_yields_nothing() {
        let universe_uuid = Uuid::from_u128(7);
        let inventory = StaticInventory::new().with_universe(Universe {
            uuid: universe_uuid,
            name: "u".to_string(),
            user_intent: Some(UserIntent::default()),
            masters: vec![],
        });
        let params = NodeTaskParams::List(ListParams { node: node(Some(universe_uuid)) });
        assert!(access_args(&params, &inventory).unwrap().is_empty());
    }

    #[test]
    fn test_provision_adds_key_pair_and_security_group() {
        let (inventory, universe_uuid) = inventory_with_key(private_key_only());
        let params = NodeTaskParams::Provision(ProvisionParams {
            node: node(Some(universe_uuid)),
            instance_type: "c4.xlarge".to_string(),
            subnet_id: "subnet-1".to_string(),
            device_info: None,
        });
        assert_eq!(
            access_args(&params, &inventory).unwrap(),
            vec![
                "--private_key_file",
                "/keys/yb-key.pem",
                "--key_pair_name",
                "yb-key",
                "--security_group",
                "yb-us-west-1-sg"
            ]
        );
    }

    #[test]
    fn test_control_omits_key_pair_and_security_group() {
        let (inventory, universe_uuid) = inventory_with_key(private_key_only());
        let params = NodeTaskParams::Control(ControlParams {
            node: node(Some(universe_uuid)),
            process: "tserver".to_string(),
            command: "start".to_string(),
        });
        assert_eq!(
            access_args(&params, &inventory).unwrap(),
            vec!["--private_key_file", "/keys/yb-key.pem"]
        );
    }

    #[test]
    fn test_vault_and_private_key_together() {
        let (inventory, universe_uuid) = inventory_with_key(KeyInfo {
            private_key: Some("/keys/k.pem".to_string()),
            vault_file: Some("/keys/k.vault".to_string()),
            vault_password_file: Some("/keys/k.vault_password".to_string()),
            public_key: None,
        });
        let params = NodeTaskParams::List(ListParams { node: node(Some(universe_uuid)) });
        assert_eq!(
            access_args(&params, &inventory).unwrap(),
            vec![
                "--vars_file",
                "/keys/k.vault",
                "--vault_password_file",
                "/keys/k.vault_password",
                "--private_key_file",
                "/keys/k.pem"
            ]
        );
    }

    #[test]
    fn test_vault_without_password_file() {
        let (inventory, universe_uuid) = inventory_with_key(KeyInfo {
            vault_file: Some("/keys/k.vault".to_string()),
            ..Default::default()
        });
        let params = NodeTaskParams::List(ListParams { node: node(Some(universe_uuid)) });
        let result = access_args(&params, &inventory);
        assert!(matches!(result, Err(NodeCommandError::MissingReference(_))));
    }

    #[test]
    fn test_unregistered_access_key() {
        let universe_uuid = Uuid::from_u128(9);
        let inventory = StaticInventory::new().with_universe(Universe {
            uuid: universe_uuid,
            name: "u".to_string(),
            user_intent: Some(UserIntent {
                access_key_code: Some("missing".to_string()),
            }),
            masters: vec![],
        });
        let params = NodeTaskParams::List(ListParams { node: node(Some(universe_uuid)) });
        let result = access_args(&params, &inventory);
        assert!(matches!(result, Err(NodeCommandError::NotFound(_))));
    }

    #[test]
    fn test_security_group_name() {
        assert_eq!(security_group_name("eu-central-1"), "yb-eu-central-1-sg");
    }
}
