use serde::{Deserialize, Serialize};
use solana_sdk::signature::Keypair;
use std::fs;
use std::path::Path;

use crate::error::{ProvisionError, ProvisionResult};

pub const DEFAULT_CONFIG_PATH: &str = "configs.json";
pub const DEFAULT_DEPLOYMENTS_PATH: &str = "deployments.json";
pub const DEFAULT_NETWORK: &str = "localnet";

/// Runtime configuration loaded from configs.json.
///
/// `main_wallet_private` is optional on purpose: workflows that require a
/// signing wallet fail with a configuration error when it is absent, without
/// touching the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configs {
    pub rpc_url: String,

    #[serde(default)]
    pub main_wallet_private: Option<String>,

    /// Network section of the dependency mapping targeted by fork runs.
    #[serde(default = "default_network")]
    pub network: String,

    #[serde(default = "default_deployments_path")]
    pub deployments_path: String,
}

fn default_network() -> String {
    DEFAULT_NETWORK.to_string()
}

fn default_deployments_path() -> String {
    DEFAULT_DEPLOYMENTS_PATH.to_string()
}

/// Reads the configs.json file and returns a Configs object.
pub fn read_configs<P: AsRef<Path>>(path: P) -> ProvisionResult<Configs> {
    let data = fs::read_to_string(&path).map_err(|e| {
        ProvisionError::Config(format!(
            "failed to read {}: {}",
            path.as_ref().display(),
            e
        ))
    })?;
    let configs: Configs = serde_json::from_str(&data)?;
    if configs.rpc_url.is_empty() {
        return Err(ProvisionError::Config("rpc_url is required".to_string()));
    }
    Ok(configs)
}

/// Load the signing wallet from the configs, if one is configured.
pub fn load_wallet(configs: &Configs) -> ProvisionResult<Option<Keypair>> {
    match configs.main_wallet_private.as_deref() {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_private_key(raw).map(Some),
    }
}

/// Parse a wallet private key from either the `[1,2,3,...]` 64-byte array
/// form or a base58 string.
pub fn parse_private_key(raw: &str) -> ProvisionResult<Keypair> {
    let raw = raw.trim();
    let bytes: Vec<u8> = if raw.starts_with('[') && raw.ends_with(']') {
        raw.trim_start_matches('[')
            .trim_end_matches(']')
            .split(',')
            .map(|s| s.trim().parse::<u8>())
            .collect::<Result<Vec<u8>, _>>()
            .map_err(|e| {
                ProvisionError::Wallet(format!("failed to parse private key array: {}", e))
            })?
    } else {
        bs58::decode(raw)
            .into_vec()
            .map_err(|e| ProvisionError::Wallet(format!("failed to decode private key: {}", e)))?
    };

    if bytes.len() != 64 {
        return Err(ProvisionError::Wallet(format!(
            "invalid private key length: expected 64 bytes, got {}",
            bytes.len()
        )));
    }

    Keypair::try_from(&bytes[..])
        .map_err(|e| ProvisionError::Wallet(format!("failed to create keypair: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signer::Signer;

    fn sample_keypair() -> Keypair {
        Keypair::new()
    }

    #[test]
    fn test_parse_private_key_base58() {
        let keypair = sample_keypair();
        let encoded = bs58::encode(keypair.to_bytes()).into_string();
        let parsed = parse_private_key(&encoded).unwrap();
        assert_eq!(parsed.pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_parse_private_key_array_form() {
        let keypair = sample_keypair();
        let encoded = format!(
            "[{}]",
            keypair
                .to_bytes()
                .iter()
                .map(|b| b.to_string())
                .collect::<Vec<_>>()
                .join(",")
        );
        let parsed = parse_private_key(&encoded).unwrap();
        assert_eq!(parsed.pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_parse_private_key_rejects_wrong_length() {
        let err = parse_private_key("[1,2,3]").unwrap_err();
        assert!(err.to_string().contains("expected 64 bytes"));
    }

    #[test]
    fn test_parse_private_key_rejects_garbage() {
        assert!(parse_private_key("not-a-key-0OIl").is_err());
    }

    #[test]
    fn test_load_wallet_absent_key_is_none() {
        let configs = Configs {
            rpc_url: "http://127.0.0.1:8899".to_string(),
            main_wallet_private: None,
            network: DEFAULT_NETWORK.to_string(),
            deployments_path: DEFAULT_DEPLOYMENTS_PATH.to_string(),
        };
        assert!(load_wallet(&configs).unwrap().is_none());

        let configs = Configs {
            main_wallet_private: Some("  ".to_string()),
            ..configs
        };
        assert!(load_wallet(&configs).unwrap().is_none());
    }

    #[test]
    fn test_read_configs_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configs.json");
        fs::write(&path, r#"{"rpc_url":"http://127.0.0.1:8899"}"#).unwrap();

        let configs = read_configs(&path).unwrap();
        assert_eq!(configs.network, DEFAULT_NETWORK);
        assert_eq!(configs.deployments_path, DEFAULT_DEPLOYMENTS_PATH);
        assert!(configs.main_wallet_private.is_none());
    }

    #[test]
    fn test_read_configs_requires_rpc_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configs.json");
        fs::write(&path, r#"{"rpc_url":""}"#).unwrap();
        assert!(read_configs(&path).is_err());
    }
}
