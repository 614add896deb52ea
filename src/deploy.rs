//! Deployment orchestrator: creates a fresh swap state account, invokes the
//! program's `initialize` entry point with the designated authorities, and
//! verifies the resulting on-chain program account.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    system_program,
    transaction::Transaction,
};

use crate::constants::{INITIALIZE_DISCRIMINATOR, SWAP_PROGRAM};
use crate::error::{ProvisionError, ProvisionResult};
use crate::logger::{log, LogTag};
use crate::provider::Provider;

/// Receipt for a successful deployment run.
#[derive(Debug, Clone)]
pub struct DeployReceipt {
    pub signature: Signature,
    pub swap_account: Pubkey,
    /// Size of the program account's data, observed post-confirmation.
    pub program_data_len: usize,
}

/// Builds the `initialize(admin, referral)` instruction.
///
/// Accounts, in order: swap state account (writable; co-signs because the
/// system program creates it inside the same transaction), admin (writable,
/// signer), referral (writable, signer), system program (read-only).
pub fn build_initialize_instruction(
    swap_account: &Pubkey,
    admin: &Pubkey,
    referral: &Pubkey,
) -> Instruction {
    let mut data = Vec::with_capacity(8 + 64);
    data.extend_from_slice(&INITIALIZE_DISCRIMINATOR);
    data.extend_from_slice(&admin.to_bytes());
    data.extend_from_slice(&referral.to_bytes());

    Instruction {
        program_id: SWAP_PROGRAM,
        accounts: vec![
            AccountMeta::new(*swap_account, true),
            AccountMeta::new(*admin, true),
            AccountMeta::new(*referral, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data,
    }
}

/// Deploys a fresh swap state account and initializes it with the given
/// authorities. One-shot: any submission or confirmation error is fatal, and
/// a failed run's key pair is discarded rather than retried.
pub async fn deploy(
    provider: &Provider,
    admin: Pubkey,
    referral: Pubkey,
) -> ProvisionResult<DeployReceipt> {
    let wallet = provider.signer()?;

    let balance = provider.sol_balance(&wallet.pubkey()).await?;
    log(
        LogTag::Deploy,
        "WALLET",
        &format!("Deploying from {} ({:.6} SOL)", wallet.pubkey(), balance),
    );

    // Fresh key pair per run; never reused.
    let swap_account = Keypair::new();
    log(
        LogTag::Deploy,
        "ACCOUNT",
        &format!("New swap state account: {}", swap_account.pubkey()),
    );

    let instruction = build_initialize_instruction(&swap_account.pubkey(), &admin, &referral);
    let recent_blockhash = provider.rpc.get_latest_blockhash().await?;

    let mut transaction =
        Transaction::new_with_payer(&[instruction], Some(&wallet.pubkey()));
    transaction
        .try_sign(&[wallet, &swap_account], recent_blockhash)
        .map_err(|e| {
            ProvisionError::Config(format!(
                "admin and referral must be signable by the active wallet: {}",
                e
            ))
        })?;

    let signature = provider.rpc.send_and_confirm_transaction(&transaction).await?;
    log(LogTag::Deploy, "TX", &format!("Initialize confirmed: {}", signature));

    // The program referenced by the transaction must be observable once it
    // confirmed; an absent account means the deployment is inconsistent.
    let program_account = provider
        .rpc
        .get_account_with_commitment(&SWAP_PROGRAM, provider.rpc.commitment())
        .await?
        .value;

    match program_account {
        Some(account) => {
            log(
                LogTag::Deploy,
                "VERIFY",
                &format!("Program account holds {} bytes", account.data.len()),
            );
            Ok(DeployReceipt {
                signature,
                swap_account: swap_account.pubkey(),
                program_data_len: account.data.len(),
            })
        }
        None => Err(ProvisionError::Verification(format!(
            "program {} has no observable account data after confirmation",
            SWAP_PROGRAM
        ))),
    }
}
