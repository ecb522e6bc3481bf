//! WPOKT bridge SDK - Rust client library for the bridge and WPOKT programs.
//!
//! This crate provides the pure, I/O-free half of the client: deterministic
//! PDA derivation, the fixed-layout instruction codec, account decoders and
//! the checks used to verify on-chain state after an operation.
//!
//! # Modules
//!
//! - [`instructions`] - PDA derivation, instruction enums and builders
//! - [`state`] - Account layouts ([`BridgeState`], [`TokenListEntry`], [`WpoktState`], ...)
//!   and the SPL Token records verification reads
//! - [`codec`] - [`Encoder`], [`Decoder`] and the [`AccountLayout`] trait
//! - [`verify`] - Field checks returning [`VerifyError`]
//!
//! # Example
//!
//! ```rust
//! use wpokt_bridge_sdk::{AccountLayout, BridgeInstruction, ClaimedMarker};
//! use solana_sdk::pubkey::Pubkey;
//!
//! let ix = BridgeInstruction::TransferRequest {
//!     token_index: 7,
//!     to: Pubkey::new_unique(),
//!     amount: 500,
//!     chain_id: 3,
//! };
//! let data = ix.encode().expect("encode");
//! assert_eq!(data.len(), 57);
//! assert_eq!(BridgeInstruction::decode(&data), Ok(ix));
//!
//! let marker = ClaimedMarker::unpack(&[0x01]).expect("decode");
//! assert!(marker.claimed);
//! ```

pub mod codec;
pub mod error;
pub mod instructions;
pub mod state;
pub mod verify;

pub use codec::{AccountLayout, Decoder, Encoder};
pub use error::{SdkError, VerifyError};
pub use instructions::{BridgeInstruction, WpoktInstruction};
pub use state::{
    AuthorizationState, BridgeState, CalculateFeeResult, ClaimedMarker, DailyTokenClaims,
    MintAccount, NonceEntry, TokenAccount, TokenAccountState, TokenAddedMarker, TokenListEntry,
    WpoktState,
};
pub use state::unpack_token_record;
