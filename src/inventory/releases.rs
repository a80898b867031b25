//! Release catalog: software version to package path.
//!
//! `ReleaseManager` is either filled explicitly or discovered from a local
//! releases directory holding `yugabyte-[ee-]<version>-<os><suffix>.tar.gz`
//! packages.

use crate::error::ReleaseError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

static RELEASE_PACKAGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^yugabyte-(?:ee-)?(.+)-(centos|darwin|linux)(.*)\.tar\.gz$")
        .expect("Invalid release package regex")
});

/// Trait for resolving a software version to its package
pub trait ReleaseCatalog: Send + Sync {
    fn release_by_version(&self, version: &str) -> Option<String>;
}

/// Version-keyed release packages.
#[derive(Debug, Clone, Default)]
pub struct ReleaseManager {
    releases: BTreeMap<String, String>,
}

impl ReleaseManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package for a version, replacing any previous entry.
    pub fn insert(&mut self, version: impl Into<String>, package: impl Into<String>) {
        self.releases.insert(version.into(), package.into());
    }

    pub fn with_release(mut self, version: impl Into<String>, package: impl Into<String>) -> Self {
        self.insert(version, package);
        self
    }

    /// Known versions, sorted.
    pub fn versions(&self) -> Vec<&str> {
        self.releases.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// Discover release packages under `dir`.
    ///
    /// Paths are visited in sorted order; the first package seen for a version wins.
    pub fn from_directory(dir: &Path) -> Result<Self, ReleaseError> {
        if !dir.is_dir() {
            return Err(ReleaseError::DirectoryNotFound(dir.display().to_string()));
        }

        let mut packages = Vec::new();
        collect_packages(dir, &mut packages)?;
        packages.sort();

        let mut manager = ReleaseManager::new();
        for path in packages {
            let Some(version) = path
                .file_name()
                .and_then(|f| f.to_str())
                .and_then(extract_release_version)
            else {
                continue;
            };
            if manager.releases.contains_key(&version) {
                log::debug!(
                    "[Releases] Ignoring duplicate package for {}: {}",
                    version,
                    path.display()
                );
                continue;
            }
            manager
                .releases
                .insert(version, path.to_string_lossy().into_owned());
        }

        log::info!(
            "[Releases] Discovered {} release(s) under {}",
            manager.len(),
            dir.display()
        );
        Ok(manager)
    }
}

impl ReleaseCatalog for ReleaseManager {
    fn release_by_version(&self, version: &str) -> Option<String> {
        self.releases.get(version).cloned()
    }
}

/// Extract the version from a release package file name.
pub fn extract_release_version(file_name: &str) -> Option<String> {
    RELEASE_PACKAGE_REGEX
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn collect_packages(dir: &Path, packages: &mut Vec<PathBuf>) -> Result<(), ReleaseError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_packages(&path, packages)?;
        } else if path.is_file() {
            packages.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_extract_release_version() {
        assert_eq!(
            extract_release_version("yugabyte-1.0.0.0-b1-centos-x86_64.tar.gz").as_deref(),
            Some("1.0.0.0-b1")
        );
        assert_eq!(
            extract_release_version("yugabyte-ee-0.9.5.0-darwin-x86_64.tar.gz").as_deref(),
            Some("0.9.5.0")
        );
        assert_eq!(extract_release_version("yugabyte-1.0.0.0.zip"), None);
        assert_eq!(extract_release_version("README.md"), None);
    }

    #[test]
    fn test_from_directory_scans_nested_packages() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        fs::create_dir_all(base.join("1.0.1.0")).unwrap();
        fs::write(base.join("yugabyte-1.0.0.0-centos-x86_64.tar.gz"), "").unwrap();
        fs::write(base.join("1.0.1.0/yugabyte-ee-1.0.1.0-centos-x86_64.tar.gz"), "").unwrap();
        fs::write(base.join("notes.txt"), "").unwrap();

        let manager = ReleaseManager::from_directory(base).expect("Failed to scan releases");
        assert_eq!(manager.versions(), vec!["1.0.0.0", "1.0.1.0"]);
        let package = manager.release_by_version("1.0.1.0").unwrap();
        assert!(package.ends_with("1.0.1.0/yugabyte-ee-1.0.1.0-centos-x86_64.tar.gz"));
    }

    #[test]
    fn test_from_directory_missing() {
        let result = ReleaseManager::from_directory(Path::new("/nonexistent/releases"));
        assert!(matches!(result, Err(ReleaseError::DirectoryNotFound(_))));
    }

    #[test]
    fn test_unknown_version_is_none() {
        let manager = ReleaseManager::new().with_release("1.0.0.0", "/releases/yb.tar.gz");
        assert!(manager.release_by_version("1.0.0.0").is_some());
        assert!(manager.release_by_version("2.0.0.0").is_none());
        assert!(manager.release_by_version("").is_none());
    }
}
