//! Well-known on-chain identifiers used across the provisioning workflows.
//!
//! None of these are configurable: the swap program id is fixed by its
//! on-chain declaration, and the router/stable-asset ids are mainnet anchors
//! the fork workflow mirrors locally.

use solana_sdk::{pubkey, pubkey::Pubkey};

/// The swap program's declared id.
pub const SWAP_PROGRAM: Pubkey = pubkey!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

/// Jupiter router program on mainnet; fork runs attach to it read-only.
pub const JUPITER_PROGRAM: Pubkey = pubkey!("JUP6i4ozu5ydDCnLiMogSckDPpbtr7BJ4FtzYWkb5Rk");

/// USDC mint on mainnet. Fork runs mint a local substitute for it rather
/// than touching the real one.
pub const USDC_MINT: Pubkey = pubkey!("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");

/// Anchor global discriminator for the swap program's `initialize` entry
/// point: first 8 bytes of sha256("global:initialize").
pub const INITIALIZE_DISCRIMINATOR: [u8; 8] = [175, 175, 109, 31, 13, 152, 155, 237];

/// Decimal precision of the substitute stable-asset mint, matching USDC.
pub const SUBSTITUTE_USD_DECIMALS: u8 = 6;
