//! Instruction builders for bridge and WPOKT transactions.
//!
//! This module provides builders for constructing Solana instructions for all
//! bridge and WPOKT operations. Each builder handles account resolution, PDA
//! derivation, and instruction serialization. Account order matches what the
//! on-chain programs parse positionally.
//!
//! # Example
//!
//! ```rust
//! use wpokt_bridge_sdk::instructions::TransferRequestBuilder;
//! use solana_sdk::pubkey::Pubkey;
//!
//! let program_id = Pubkey::new_unique();
//!
//! let ix = TransferRequestBuilder::new(program_id)
//!     .source_authority(Pubkey::new_unique())
//!     .source_token_account(Pubkey::new_unique())
//!     .mint(Pubkey::new_unique())
//!     .fee_result_account(Pubkey::new_unique())
//!     .to(Pubkey::new_unique())
//!     .token_index(1)
//!     .amount(500)
//!     .chain_id(3)
//!     .build()
//!     .expect("should build instruction");
//! assert_eq!(ix.data.len(), 57);
//! ```

use solana_sdk::{pubkey, pubkey::Pubkey};

pub mod add_token;
pub mod admin;
pub mod bridge;
pub mod construct;
pub mod dictionaries;
pub mod fees;
pub mod minter;
pub mod nonces;
pub mod pda;
pub mod permit;
pub mod transfer_receipt;
pub mod transfer_request;
pub mod transfer_with_authorization;
pub mod withdraw_fees;
pub mod wpokt;

/// SPL Token program.
pub const TOKEN_PROGRAM_ID: Pubkey = spl_token_interface::ID;

/// System program.
pub const SYSTEM_PROGRAM_ID: Pubkey = pubkey!("11111111111111111111111111111111");

/// Token index the bridge assigns to the WPOKT mint during construction.
pub const WPOKT_TOKEN_INDEX: u64 = 1;

pub use add_token::AddTokenBuilder;
pub use bridge::BridgeInstruction;
pub use construct::ConstructBuilder;
pub use pda::{
    derive_address, derive_authorization_address, derive_bridge_address,
    derive_bridge_token_account_address, derive_claimed_address,
    derive_daily_token_claims_address, derive_nonce_address, derive_token_added_address,
    derive_token_list_address, derive_wpokt_address, seed_u64, BridgePdas, ClaimPdas, WpoktPdas,
};
pub use permit::PermitBuilder;
pub use transfer_receipt::TransferReceiptBuilder;
pub use transfer_request::TransferRequestBuilder;
pub use transfer_with_authorization::TransferWithAuthorizationBuilder;
pub use withdraw_fees::WithdrawFeesBuilder;
pub use wpokt::WpoktInstruction;
