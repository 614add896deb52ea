use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Configuration error: {0}")] Config(String),

    #[error("Wallet error: {0}")] Wallet(String),

    #[error("RPC error: {0}")] Rpc(String),

    #[error("Verification error: {0}")] Verification(String),

    #[error("Parse error: {0}")] Parse(String),

    #[error("Serialization error: {0}")] Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")] Io(#[from] std::io::Error),
}

impl ProvisionError {
    /// Errors that indicate a broken operator setup rather than a transient
    /// network condition. None of them are retried; everything propagates to
    /// the top-level entry point.
    pub fn is_critical(&self) -> bool {
        match self {
            ProvisionError::Config(_) => true,
            ProvisionError::Wallet(_) => true,
            ProvisionError::Verification(_) => true,
            _ => false,
        }
    }
}

impl From<solana_client::client_error::ClientError> for ProvisionError {
    fn from(e: solana_client::client_error::ClientError) -> Self {
        ProvisionError::Rpc(e.to_string())
    }
}

impl From<solana_sdk::signer::SignerError> for ProvisionError {
    fn from(e: solana_sdk::signer::SignerError) -> Self {
        ProvisionError::Wallet(e.to_string())
    }
}

pub type ProvisionResult<T> = Result<T, ProvisionError>;
