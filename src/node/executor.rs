//! Hand-off to the devops executor.
//!
//! The composer never runs anything itself. A finished [`NodeInvocation`] is
//! passed to a [`DevopsExecutor`], which owns locating the script, setting up
//! its environment and running it.

use crate::models::CloudType;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

static SHELL_SAFE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_@%+=:,./-]+$").expect("Invalid shell-safe regex")
});

/// Devops command group for node operations.
pub const INSTANCE_COMMAND_TYPE: &str = "instance";

/// A fully composed node command, scoped to a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInvocation {
    pub cloud: CloudType,
    pub region_uuid: Uuid,
    pub region_code: String,
    pub command_type: String,
    /// Lower-cased action name
    pub verb: String,
    /// Action arguments, node name last
    pub args: Vec<String>,
    pub cloud_args: Vec<String>,
}

impl NodeInvocation {
    /// Full argv for the ybcloud wrapper:
    /// `<script> <cloud> --region <code> <cloud args> instance <verb> <args>`.
    pub fn command_line(&self, script: &Path) -> Vec<String> {
        let mut argv = Vec::with_capacity(6 + self.cloud_args.len() + self.args.len());
        argv.push(script.to_string_lossy().into_owned());
        argv.push(self.cloud.as_str().to_string());
        argv.push("--region".to_string());
        argv.push(self.region_code.clone());
        argv.extend(self.cloud_args.iter().cloned());
        argv.push(self.command_type.clone());
        argv.push(self.verb.clone());
        argv.extend(self.args.iter().cloned());
        argv
    }

    /// Command line as a single copy-pasteable shell string.
    pub fn render(&self, script: &Path) -> String {
        self.command_line(script)
            .iter()
            .map(|arg| shell_quote(arg))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Quote an argument for POSIX shells when it contains anything unsafe.
pub fn shell_quote(arg: &str) -> String {
    if SHELL_SAFE_REGEX.is_match(arg) {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Outcome reported by an executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellResponse {
    pub code: i32,
    pub message: String,
}

impl ShellResponse {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// Trait for whatever actually runs composed node commands
pub trait DevopsExecutor: Send + Sync {
    fn exec_command(&self, invocation: &NodeInvocation) -> ShellResponse;
}

/// Executor that only logs the command it would run.
#[derive(Debug, Clone)]
pub struct DryRunExecutor {
    script: PathBuf,
}

impl DryRunExecutor {
    pub fn new(script: impl Into<PathBuf>) -> Self {
        DryRunExecutor {
            script: script.into(),
        }
    }

    pub fn script(&self) -> &Path {
        &self.script
    }
}

impl DevopsExecutor for DryRunExecutor {
    fn exec_command(&self, invocation: &NodeInvocation) -> ShellResponse {
        let rendered = invocation.render(&self.script);
        log::info!(
            "[DryRun] Would run {} {} in region {}: {}",
            invocation.command_type,
            invocation.verb,
            invocation.region_code,
            rendered
        );
        ShellResponse {
            code: 0,
            message: rendered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation() -> NodeInvocation {
        NodeInvocation {
            cloud: CloudType::Aws,
            region_uuid: Uuid::nil(),
            region_code: "us-west-2".to_string(),
            command_type: INSTANCE_COMMAND_TYPE.to_string(),
            verb: "list".to_string(),
            args: vec!["--as_json".to_string(), "n1".to_string()],
            cloud_args: vec!["--zone".to_string(), "us-west-2a".to_string()],
        }
    }

    #[test]
    fn test_command_line_order() {
        let argv = invocation().command_line(Path::new("/opt/devops/bin/ybcloud.sh"));
        assert_eq!(
            argv,
            vec![
                "/opt/devops/bin/ybcloud.sh",
                "aws",
                "--region",
                "us-west-2",
                "--zone",
                "us-west-2a",
                "instance",
                "list",
                "--as_json",
                "n1"
            ]
        );
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("--zone"), "--zone");
        assert_eq!(shell_quote("10.0.0.1:7100,10.0.0.2:7100"), "10.0.0.1:7100,10.0.0.2:7100");
        assert_eq!(shell_quote(r#"{"a":"b"}"#), r#"'{"a":"b"}'"#);
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn test_dry_run_executor_reports_rendered_command() {
        let executor = DryRunExecutor::new("bin/ybcloud.sh");
        assert_eq!(executor.script(), Path::new("bin/ybcloud.sh"));
        let response = executor.exec_command(&invocation());
        assert!(response.is_success());
        assert_eq!(
            response.message,
            "bin/ybcloud.sh aws --region us-west-2 --zone us-west-2a instance list --as_json n1"
        );
    }
}
