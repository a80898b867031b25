//! Read-only lookups into persisted platform state.
//!
//! The composer never owns universes, access keys or node instances; it only
//! reads them through the [`Inventory`] trait. `StaticInventory` is the
//! in-memory implementation used by the binary and by tests.

pub mod releases;

use crate::error::ConfigError;
use crate::models::{AccessKey, NodeInstance, Universe};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use uuid::Uuid;

pub use releases::{ReleaseCatalog, ReleaseManager};

/// Trait for persisted-state lookups the composer depends on
pub trait Inventory: Send + Sync {
    fn universe(&self, uuid: &Uuid) -> Option<Universe>;
    fn access_key(&self, provider_uuid: &Uuid, key_code: &str) -> Option<AccessKey>;
    fn node_instance(&self, node_name: &str) -> Option<NodeInstance>;
}

/// On-disk shape of an inventory file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryFile {
    pub universes: Vec<Universe>,
    pub access_keys: Vec<AccessKey>,
    pub node_instances: Vec<NodeInstance>,
}

/// In-memory inventory keyed for direct lookup.
#[derive(Debug, Clone, Default)]
pub struct StaticInventory {
    universes: HashMap<Uuid, Universe>,
    access_keys: HashMap<(Uuid, String), AccessKey>,
    node_instances: HashMap<String, NodeInstance>,
}

impl StaticInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_universe(&mut self, universe: Universe) {
        self.universes.insert(universe.uuid, universe);
    }

    pub fn insert_access_key(&mut self, key: AccessKey) {
        self.access_keys
            .insert((key.provider_uuid, key.key_code.clone()), key);
    }

    pub fn insert_node_instance(&mut self, node: NodeInstance) {
        self.node_instances.insert(node.node_name.clone(), node);
    }

    pub fn with_universe(mut self, universe: Universe) -> Self {
        self.insert_universe(universe);
        self
    }

    pub fn with_access_key(mut self, key: AccessKey) -> Self {
        self.insert_access_key(key);
        self
    }

    pub fn with_node_instance(mut self, node: NodeInstance) -> Self {
        self.insert_node_instance(node);
        self
    }
}

impl From<InventoryFile> for StaticInventory {
    fn from(file: InventoryFile) -> Self {
        let mut inventory = StaticInventory::new();
        for universe in file.universes {
            inventory.insert_universe(universe);
        }
        for key in file.access_keys {
            inventory.insert_access_key(key);
        }
        for node in file.node_instances {
            inventory.insert_node_instance(node);
        }
        inventory
    }
}

impl Inventory for StaticInventory {
    fn universe(&self, uuid: &Uuid) -> Option<Universe> {
        self.universes.get(uuid).cloned()
    }

    fn access_key(&self, provider_uuid: &Uuid, key_code: &str) -> Option<AccessKey> {
        self.access_keys
            .get(&(*provider_uuid, key_code.to_string()))
            .cloned()
    }

    fn node_instance(&self, node_name: &str) -> Option<NodeInstance> {
        self.node_instances.get(node_name).cloned()
    }
}

/// Load an inventory from a JSON file.
pub fn load_inventory_from_file(path: &Path) -> Result<StaticInventory, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound(format!(
                "Inventory file not found at: {}",
                path.display()
            ))
        } else {
            ConfigError::IoError(e)
        }
    })?;

    let file: InventoryFile = serde_json::from_str(&content)?;
    log::debug!(
        "[Inventory] Loaded {} universes, {} access keys, {} node instances from {}",
        file.universes.len(),
        file.access_keys.len(),
        file.node_instances.len(),
        path.display()
    );

    Ok(StaticInventory::from(file))
}
