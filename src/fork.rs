//! Fork provisioner: attaches to the well-known router program, mints a
//! substitute stable-asset token, ensures the wallet's associated token
//! account for it, and records the resulting addresses in the network
//! dependency mapping.
//!
//! The three on-chain steps are sequential and not transactional: a failure
//! aborts the remaining steps, and artifacts already created stay valid
//! on-chain but unreferenced by configuration.

use solana_program::program_pack::Pack;
use solana_sdk::{
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    system_instruction,
    transaction::Transaction,
};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account,
};
use spl_token::state::Mint;
use std::path::Path;

use crate::constants::{JUPITER_PROGRAM, SUBSTITUTE_USD_DECIMALS};
use crate::deployments::{DependencyMap, NetworkDependencies};
use crate::error::{ProvisionError, ProvisionResult};
use crate::logger::{log, LogTag};
use crate::provider::Provider;

/// Read-only binding to an already deployed program. Attaching issues no
/// transaction and mutates no on-chain state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramHandle {
    id: Pubkey,
}

impl ProgramHandle {
    pub fn id(&self) -> Pubkey {
        self.id
    }
}

pub fn attach_program(id: Pubkey) -> ProgramHandle {
    ProgramHandle { id }
}

/// Creates a new token mint with the given decimal precision and issuing
/// authority. One transaction: fund the account rent-exempt under the SPL
/// token program, then initialize the mint.
pub async fn create_mint(
    provider: &Provider,
    decimals: u8,
    authority: Pubkey,
) -> ProvisionResult<Pubkey> {
    let wallet = provider.signer()?;
    let mint = Keypair::new();

    let rent = provider
        .rpc
        .get_minimum_balance_for_rent_exemption(Mint::LEN)
        .await?;

    let create_account_ix = system_instruction::create_account(
        &wallet.pubkey(),
        &mint.pubkey(),
        rent,
        Mint::LEN as u64,
        &spl_token::id(),
    );
    let initialize_mint_ix = spl_token::instruction::initialize_mint(
        &spl_token::id(),
        &mint.pubkey(),
        &authority,
        None,
        decimals,
    )
    .map_err(|e| ProvisionError::Parse(format!("initialize_mint instruction: {}", e)))?;

    let recent_blockhash = provider.rpc.get_latest_blockhash().await?;
    let mut transaction = Transaction::new_with_payer(
        &[create_account_ix, initialize_mint_ix],
        Some(&wallet.pubkey()),
    );
    transaction.try_sign(&[wallet, &mint], recent_blockhash)?;

    let signature = provider.rpc.send_and_confirm_transaction(&transaction).await?;
    log(
        LogTag::Fork,
        "MINT",
        &format!(
            "Created mint {} ({} decimals). TX: {}",
            mint.pubkey(),
            decimals,
            signature
        ),
    );

    Ok(mint.pubkey())
}

/// Idempotent lookup-or-create for the owner's associated token account of
/// `mint`. Returns the existing address without a transaction when present.
pub async fn get_or_create_associated_token_account(
    provider: &Provider,
    mint: &Pubkey,
    owner: &Pubkey,
) -> ProvisionResult<Pubkey> {
    let address = get_associated_token_address(owner, mint);

    let existing = provider
        .rpc
        .get_account_with_commitment(&address, provider.rpc.commitment())
        .await?
        .value;
    if existing.is_some() {
        log(
            LogTag::Fork,
            "ATA",
            &format!("Token account {} already exists", address),
        );
        return Ok(address);
    }

    let wallet = provider.signer()?;
    let instruction =
        create_associated_token_account(&wallet.pubkey(), owner, mint, &spl_token::id());

    let recent_blockhash = provider.rpc.get_latest_blockhash().await?;
    let mut transaction = Transaction::new_with_payer(&[instruction], Some(&wallet.pubkey()));
    transaction.try_sign(&[wallet], recent_blockhash)?;

    let signature = provider.rpc.send_and_confirm_transaction(&transaction).await?;
    log(
        LogTag::Fork,
        "ATA",
        &format!("Created token account {}. TX: {}", address, signature),
    );

    Ok(address)
}

/// Receipt for a successful fork run.
#[derive(Debug, Clone)]
pub struct ForkReceipt {
    pub router: Pubkey,
    pub usd_mint: Pubkey,
    pub usd_token_account: Pubkey,
}

/// Runs the full fork workflow against `network` and rewrites that section
/// of the dependency mapping at `mapping_path`.
pub async fn provision(
    provider: &Provider,
    network: &str,
    mapping_path: &Path,
) -> ProvisionResult<ForkReceipt> {
    let wallet_address = provider.wallet_address()?;

    let router = attach_program(JUPITER_PROGRAM);
    log(
        LogTag::Fork,
        "ATTACH",
        &format!("Attached router program {}", router.id()),
    );

    let usd_mint = create_mint(provider, SUBSTITUTE_USD_DECIMALS, wallet_address).await?;
    let usd_token_account =
        get_or_create_associated_token_account(provider, &usd_mint, &wallet_address).await?;

    let mut mapping = DependencyMap::load(mapping_path)?;
    mapping.set_network(
        network,
        NetworkDependencies {
            router: router.id().to_string(),
            usd_mint: usd_mint.to_string(),
        },
    );
    mapping.store(mapping_path)?;
    log(
        LogTag::Fork,
        "CONFIG",
        &format!(
            "Recorded {} dependencies in {}",
            network,
            mapping_path.display()
        ),
    );

    Ok(ForkReceipt {
        router: router.id(),
        usd_mint,
        usd_token_account,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_program_is_pure() {
        // No provider, no transaction: attaching only binds the id.
        let handle = attach_program(JUPITER_PROGRAM);
        assert_eq!(handle.id(), JUPITER_PROGRAM);
    }

    #[test]
    fn test_substitute_decimals_match_usdc() {
        assert_eq!(SUBSTITUTE_USD_DECIMALS, 6);
    }

    #[test]
    fn test_associated_address_is_deterministic() {
        let mint = Keypair::new().pubkey();
        let owner = Keypair::new().pubkey();

        let first = get_associated_token_address(&owner, &mint);
        let second = get_associated_token_address(&owner, &mint);
        assert_eq!(first, second);

        let other_owner = Keypair::new().pubkey();
        assert_ne!(first, get_associated_token_address(&other_owner, &mint));
    }

    #[tokio::test]
    async fn test_create_mint_without_wallet_is_config_error() {
        let provider = Provider::new("http://127.0.0.1:1", None);
        let authority = Keypair::new().pubkey();

        let err = create_mint(&provider, SUBSTITUTE_USD_DECIMALS, authority)
            .await
            .unwrap_err();
        assert!(matches!(err, ProvisionError::Config(_)));
    }

    #[tokio::test]
    async fn test_provision_without_wallet_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mapping_path = dir.path().join("deployments.json");

        let provider = Provider::new("http://127.0.0.1:1", None);
        let err = provision(&provider, "localnet", &mapping_path)
            .await
            .unwrap_err();

        assert!(matches!(err, ProvisionError::Config(_)));
        assert!(!mapping_path.exists());
    }
}
