//! Account layouts.
//!
//! Decoders for the records owned by the bridge and WPOKT programs, plus the
//! SPL Token accounts that verification reads.

pub mod bridge;
pub mod token;
pub mod wpokt;

pub use bridge::{
    BridgeState, CalculateFeeResult, ClaimedMarker, DailyTokenClaims, TokenAddedMarker,
    TokenListEntry,
};
pub use token::{unpack_token_record, MintAccount, TokenAccount, TokenAccountState};
pub use wpokt::{AuthorizationState, NonceEntry, WpoktState};
