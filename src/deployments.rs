use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::{fs, io};

use crate::error::ProvisionResult;

/// Dependency addresses recorded for one network section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDependencies {
    pub router: String,
    pub usd_mint: String,
}

/// Network name → dependency addresses, persisted as pretty-printed JSON.
///
/// A fork run replaces its network's section wholesale; other sections are
/// left untouched. Last writer wins, there is no cross-process locking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyMap {
    networks: BTreeMap<String, NetworkDependencies>,
}

impl DependencyMap {
    /// Load the mapping from disk. A missing file yields an empty map.
    pub fn load<P: AsRef<Path>>(path: P) -> ProvisionResult<Self> {
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the whole section for `network`.
    pub fn set_network(&mut self, network: &str, dependencies: NetworkDependencies) {
        self.networks.insert(network.to_string(), dependencies);
    }

    pub fn network(&self, network: &str) -> Option<&NetworkDependencies> {
        self.networks.get(network)
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    /// Write the full mapping to disk atomically: serialize into a temporary
    /// file in the target directory, then rename over the destination.
    pub fn store<P: AsRef<Path>>(&self, path: P) -> ProvisionResult<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(serde_json::to_string_pretty(self)?.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deps(router: &str, usd_mint: &str) -> NetworkDependencies {
        NetworkDependencies {
            router: router.to_string(),
            usd_mint: usd_mint.to_string(),
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let map = DependencyMap::load(dir.path().join("deployments.json")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_store_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployments.json");

        let mut map = DependencyMap::default();
        map.set_network("localnet", deps("Router111", "Mint111"));
        map.store(&path).unwrap();

        let loaded = DependencyMap::load(&path).unwrap();
        assert_eq!(loaded, map);
        assert_eq!(loaded.network("localnet").unwrap().router, "Router111");
    }

    #[test]
    fn test_set_network_replaces_section_wholesale() {
        let mut map = DependencyMap::default();
        map.set_network("localnet", deps("OldRouter", "OldMint"));
        map.set_network("devnet", deps("DevRouter", "DevMint"));

        map.set_network("localnet", deps("NewRouter", "NewMint"));

        let section = map.network("localnet").unwrap();
        assert_eq!(section.router, "NewRouter");
        assert_eq!(section.usd_mint, "NewMint");
        // Unrelated sections survive the rewrite.
        assert_eq!(map.network("devnet").unwrap().router, "DevRouter");
    }

    #[test]
    fn test_store_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployments.json");

        let mut map = DependencyMap::default();
        map.set_network("localnet", deps("First", "FirstMint"));
        map.store(&path).unwrap();

        map.set_network("localnet", deps("Second", "SecondMint"));
        map.store(&path).unwrap();

        let loaded = DependencyMap::load(&path).unwrap();
        assert_eq!(loaded.network("localnet").unwrap().router, "Second");
    }

    #[test]
    fn test_serialized_shape_is_keyed_by_network() {
        let mut map = DependencyMap::default();
        map.set_network("localnet", deps("Router111", "Mint111"));

        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["localnet"]["router"], "Router111");
        assert_eq!(json["localnet"]["usd_mint"], "Mint111");
    }
}
