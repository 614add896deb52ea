use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
};

use crate::config::{self, Configs};
use crate::error::{ProvisionError, ProvisionResult};

/// Explicit execution context for both workflows: one RPC connection and an
/// optional signing wallet. Threaded into every operation instead of living
/// in ambient globals, so runs stay isolated from each other.
pub struct Provider {
    pub rpc: RpcClient,
    wallet: Option<Keypair>,
}

impl Provider {
    pub fn new(rpc_url: &str, wallet: Option<Keypair>) -> Self {
        let rpc = RpcClient::new_with_commitment(
            rpc_url.to_string(),
            CommitmentConfig::confirmed(),
        );
        Self { rpc, wallet }
    }

    pub fn from_configs(configs: &Configs) -> ProvisionResult<Self> {
        let wallet = config::load_wallet(configs)?;
        Ok(Self::new(&configs.rpc_url, wallet))
    }

    /// The active signing wallet. Operations that submit transactions call
    /// this before any network round-trip.
    pub fn signer(&self) -> ProvisionResult<&Keypair> {
        self.wallet.as_ref().ok_or_else(|| {
            ProvisionError::Config(
                "no signing wallet configured (main_wallet_private is missing)".to_string(),
            )
        })
    }

    pub fn wallet_address(&self) -> ProvisionResult<Pubkey> {
        Ok(self.signer()?.pubkey())
    }

    /// Wallet balance in SOL.
    pub async fn sol_balance(&self, address: &Pubkey) -> ProvisionResult<f64> {
        let lamports = self.rpc.get_balance(address).await?;
        Ok(lamports as f64 / LAMPORTS_PER_SOL as f64)
    }
}
