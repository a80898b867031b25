//! Core data types for the node command composer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Property key carrying the software upgrade sub-step.
pub const TASK_SUB_TYPE_PROPERTY: &str = "taskSubType";

/// Property key carrying the server role a gflags update targets.
pub const PROCESS_TYPE_PROPERTY: &str = "processType";

/// Default master RPC port.
pub const DEFAULT_MASTER_RPC_PORT: u16 = 7100;

/// Cloud provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudType {
    Aws,
    Gcp,
    Azu,
    Docker,
    Onprem,
}

impl CloudType {
    /// Provider code as understood by the devops scripts.
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudType::Aws => "aws",
            CloudType::Gcp => "gcp",
            CloudType::Azu => "azu",
            CloudType::Docker => "docker",
            CloudType::Onprem => "onprem",
        }
    }
}

impl fmt::Display for CloudType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CloudType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aws" => Ok(CloudType::Aws),
            "gcp" => Ok(CloudType::Gcp),
            "azu" => Ok(CloudType::Azu),
            "docker" => Ok(CloudType::Docker),
            "onprem" => Ok(CloudType::Onprem),
            _ => Err(format!("Unknown cloud type: {}", s)),
        }
    }
}

/// Node lifecycle action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeCommandType {
    Provision,
    Configure,
    Destroy,
    List,
    Control,
}

impl NodeCommandType {
    /// Lower-cased action name, used as the devops command verb.
    pub fn verb(&self) -> &'static str {
        match self {
            NodeCommandType::Provision => "provision",
            NodeCommandType::Configure => "configure",
            NodeCommandType::Destroy => "destroy",
            NodeCommandType::List => "list",
            NodeCommandType::Control => "control",
        }
    }
}

impl fmt::Display for NodeCommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Region, resolved by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub uuid: Uuid,
    pub code: String,
    #[serde(default)]
    pub name: String,
    /// Machine image used when provisioning into this region
    #[serde(default)]
    pub yb_image: Option<String>,
}

/// Availability zone, resolved by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityZone {
    pub uuid: Uuid,
    pub code: String,
    #[serde(default)]
    pub name: String,
}

/// Storage volume layout.
///
/// `num_volumes` takes precedence over `mount_points` when both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    #[serde(default)]
    pub num_volumes: Option<u32>,
    #[serde(default)]
    pub mount_points: Option<String>,
    #[serde(default)]
    pub volume_size: Option<u32>,
    #[serde(default)]
    pub disk_iops: Option<u32>,
}

/// Fields every node task carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDetails {
    pub cloud: CloudType,
    pub provider_uuid: Uuid,
    pub region: Region,
    pub zone: AvailabilityZone,
    pub node_name: String,
    #[serde(default)]
    pub universe_uuid: Option<Uuid>,
}

/// Provision (setup server) parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionParams {
    pub node: NodeDetails,
    pub instance_type: String,
    pub subnet_id: String,
    #[serde(default)]
    pub device_info: Option<DeviceInfo>,
}

/// What a configure call pushes to the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigureKind {
    /// Full software package plus configuration
    Everything,
    /// Software package only, one upgrade sub-step at a time
    #[serde(alias = "Software")]
    SoftwareOnly,
    /// Runtime flag changes only
    #[serde(alias = "GFlags")]
    GFlagsOnly,
}

/// Software upgrade sub-step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeTaskSubType {
    Download,
    Install,
}

impl UpgradeTaskSubType {
    /// Ansible tag selecting this sub-step.
    pub fn tag(&self) -> &'static str {
        match self {
            UpgradeTaskSubType::Download => "download-software",
            UpgradeTaskSubType::Install => "install-software",
        }
    }
}

impl FromStr for UpgradeTaskSubType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Download" => Ok(UpgradeTaskSubType::Download),
            "Install" => Ok(UpgradeTaskSubType::Install),
            _ => Err(format!("Unknown task sub type: {}", s)),
        }
    }
}

/// Cluster server role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerType {
    #[serde(rename = "MASTER")]
    Master,
    #[serde(rename = "TSERVER")]
    Tserver,
}

impl ServerType {
    /// Ansible tag selecting this role's gflags.
    pub fn gflags_tag(&self) -> &'static str {
        match self {
            ServerType::Master => "master-gflags",
            ServerType::Tserver => "tserver-gflags",
        }
    }
}

impl FromStr for ServerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MASTER" => Ok(ServerType::Master),
            "TSERVER" => Ok(ServerType::Tserver),
            _ => Err(format!("Unknown server type: {}", s)),
        }
    }
}

/// Configure (configure servers) parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigureParams {
    pub node: NodeDetails,
    pub yb_software_version: String,
    #[serde(rename = "type")]
    pub kind: ConfigureKind,
    #[serde(default)]
    pub is_master_in_shell_mode: bool,
    /// Free-form task properties (`taskSubType`, `processType`)
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub gflags: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub device_info: Option<DeviceInfo>,
}

impl ConfigureParams {
    /// Look up a task property.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }
}

/// Control (cluster server ctl) parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlParams {
    pub node: NodeDetails,
    /// Server process, e.g. `master` or `tserver`
    pub process: String,
    /// Control command, e.g. `start` or `stop`
    pub command: String,
}

/// List (update node info) parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    pub node: NodeDetails,
}

/// Destroy (destroy server) parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestroyParams {
    pub node: NodeDetails,
    #[serde(default)]
    pub device_info: Option<DeviceInfo>,
}

/// Parameter bundle for one node task, one variant per lifecycle action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum NodeTaskParams {
    Provision(ProvisionParams),
    Configure(ConfigureParams),
    Control(ControlParams),
    List(ListParams),
    Destroy(DestroyParams),
}

impl NodeTaskParams {
    /// The action this bundle was built for.
    pub fn command_type(&self) -> NodeCommandType {
        match self {
            NodeTaskParams::Provision(_) => NodeCommandType::Provision,
            NodeTaskParams::Configure(_) => NodeCommandType::Configure,
            NodeTaskParams::Control(_) => NodeCommandType::Control,
            NodeTaskParams::List(_) => NodeCommandType::List,
            NodeTaskParams::Destroy(_) => NodeCommandType::Destroy,
        }
    }

    /// Shared node fields.
    pub fn node(&self) -> &NodeDetails {
        match self {
            NodeTaskParams::Provision(p) => &p.node,
            NodeTaskParams::Configure(p) => &p.node,
            NodeTaskParams::Control(p) => &p.node,
            NodeTaskParams::List(p) => &p.node,
            NodeTaskParams::Destroy(p) => &p.node,
        }
    }

    /// Device layout, for the actions that carry one.
    pub fn device_info(&self) -> Option<&DeviceInfo> {
        match self {
            NodeTaskParams::Provision(p) => p.device_info.as_ref(),
            NodeTaskParams::Configure(p) => p.device_info.as_ref(),
            NodeTaskParams::Destroy(p) => p.device_info.as_ref(),
            NodeTaskParams::Control(_) | NodeTaskParams::List(_) => None,
        }
    }

    pub fn is_provision(&self) -> bool {
        matches!(self, NodeTaskParams::Provision(_))
    }
}

/// Universe-level intent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIntent {
    /// Access key the universe's nodes are reached with; `None` for unmanaged access
    #[serde(default)]
    pub access_key_code: Option<String>,
}

/// A master's RPC endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterAddress {
    pub host: String,
    #[serde(default = "default_master_rpc_port")]
    pub rpc_port: u16,
}

fn default_master_rpc_port() -> u16 {
    DEFAULT_MASTER_RPC_PORT
}

/// A deployed cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Universe {
    pub uuid: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub user_intent: Option<UserIntent>,
    #[serde(default)]
    pub masters: Vec<MasterAddress>,
}

impl Universe {
    /// Comma-separated `host:port` list of the universe's masters.
    pub fn master_addresses(&self) -> String {
        self.masters
            .iter()
            .map(|m| format!("{}:{}", m.host, m.rpc_port))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Configured access key code, if any.
    pub fn access_key_code(&self) -> Option<&str> {
        self.user_intent
            .as_ref()
            .and_then(|intent| intent.access_key_code.as_deref())
    }
}

/// Credential file locations for an access key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInfo {
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default)]
    pub private_key: Option<String>,
    #[serde(default)]
    pub vault_file: Option<String>,
    #[serde(default)]
    pub vault_password_file: Option<String>,
}

/// Access key registered against a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessKey {
    pub key_code: String,
    pub provider_uuid: Uuid,
    #[serde(default)]
    pub key_info: KeyInfo,
}

/// Pre-registered on-prem machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInstance {
    pub node_name: String,
    #[serde(default)]
    pub details: serde_json::Value,
}

impl NodeInstance {
    /// Compact JSON encoding of the instance details.
    pub fn details_json(&self) -> String {
        self.details.to_string()
    }
}
