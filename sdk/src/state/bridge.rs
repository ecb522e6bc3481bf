//! Bridge program account layouts.

use solana_sdk::pubkey::Pubkey;

use crate::codec::{AccountLayout, Decoder, Encoder};
use crate::error::SdkError;

/// Bridge global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BridgeState {
    /// Whether the bridge was constructed.
    pub is_initialized: bool,
    /// Bridge owner.
    pub owner: Pubkey,
    /// Delay before a scheduled fee change takes effect.
    pub fee_update_duration: u64,
    /// Signer allowed to attest inbound transfers.
    pub verify_address: Pubkey,
    /// Next outbound transfer index.
    pub current_index: u64,
    /// Chain id of this deployment.
    pub chain_id: u64,
    /// Time at which `new_stable_fee` applies.
    pub stable_fee_update_time: u64,
    /// Current stable fee.
    pub stable_fee: u64,
    /// Scheduled stable fee.
    pub new_stable_fee: u64,
}

impl AccountLayout for BridgeState {
    const NAME: &'static str = "BridgeState";
    const LEN: usize = 113;

    fn encode_fields(&self, enc: &mut Encoder) {
        enc.put_bool(self.is_initialized)
            .put_pubkey(&self.owner)
            .put_u64(self.fee_update_duration)
            .put_pubkey(&self.verify_address)
            .put_u64(self.current_index)
            .put_u64(self.chain_id)
            .put_u64(self.stable_fee_update_time)
            .put_u64(self.stable_fee)
            .put_u64(self.new_stable_fee);
    }

    fn decode_fields(dec: &mut Decoder<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            is_initialized: dec.read_bool("is_initialized")?,
            owner: dec.read_pubkey()?,
            fee_update_duration: dec.read_u64()?,
            verify_address: dec.read_pubkey()?,
            current_index: dec.read_u64()?,
            chain_id: dec.read_u64()?,
            stable_fee_update_time: dec.read_u64()?,
            stable_fee: dec.read_u64()?,
            new_stable_fee: dec.read_u64()?,
        })
    }
}

/// Per-token registration, keyed by token index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenListEntry {
    /// Whether the entry was written.
    pub is_initialized: bool,
    /// Mint registered at this index.
    pub token_address: Pubkey,
    /// Whether the token is registered.
    pub exists: bool,
    /// Whether transfers of the token are paused.
    pub paused: bool,
    /// Fees collected and not yet withdrawn.
    pub total_fees_collected: u64,
    /// Current fee.
    pub fee: u64,
    /// Time at which `new_fee` applies.
    pub fee_update_time: u64,
    /// Scheduled fee.
    pub new_fee: u64,
    /// Daily claim limit.
    pub limit: u64,
    /// Start of the current limit window.
    pub limit_timestamp: u64,
}

impl AccountLayout for TokenListEntry {
    const NAME: &'static str = "TokenListEntry";
    const LEN: usize = 83;

    fn encode_fields(&self, enc: &mut Encoder) {
        enc.put_bool(self.is_initialized)
            .put_pubkey(&self.token_address)
            .put_bool(self.exists)
            .put_bool(self.paused)
            .put_u64(self.total_fees_collected)
            .put_u64(self.fee)
            .put_u64(self.fee_update_time)
            .put_u64(self.new_fee)
            .put_u64(self.limit)
            .put_u64(self.limit_timestamp);
    }

    fn decode_fields(dec: &mut Decoder<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            is_initialized: dec.read_bool("is_initialized")?,
            token_address: dec.read_pubkey()?,
            exists: dec.read_bool("exists")?,
            paused: dec.read_bool("paused")?,
            total_fees_collected: dec.read_u64()?,
            fee: dec.read_u64()?,
            fee_update_time: dec.read_u64()?,
            new_fee: dec.read_u64()?,
            limit: dec.read_u64()?,
            limit_timestamp: dec.read_u64()?,
        })
    }
}

/// Marks one (chain id, transfer index) pair as claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClaimedMarker {
    /// Whether the transfer was claimed.
    pub claimed: bool,
}

impl AccountLayout for ClaimedMarker {
    const NAME: &'static str = "ClaimedMarker";
    const LEN: usize = 1;

    fn encode_fields(&self, enc: &mut Encoder) {
        enc.put_bool(self.claimed);
    }

    fn decode_fields(dec: &mut Decoder<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            claimed: dec.read_bool("claimed")?,
        })
    }
}

/// Amount of a token claimed in the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DailyTokenClaims {
    /// Claimed amount.
    pub daily_token_claims: u64,
}

impl AccountLayout for DailyTokenClaims {
    const NAME: &'static str = "DailyTokenClaims";
    const LEN: usize = 8;

    fn encode_fields(&self, enc: &mut Encoder) {
        enc.put_u64(self.daily_token_claims);
    }

    fn decode_fields(dec: &mut Decoder<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            daily_token_claims: dec.read_u64()?,
        })
    }
}

/// Marks a mint as registered with the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenAddedMarker {
    /// Whether the mint was added.
    pub token_added: bool,
}

impl AccountLayout for TokenAddedMarker {
    const NAME: &'static str = "TokenAddedMarker";
    const LEN: usize = 1;

    fn encode_fields(&self, enc: &mut Encoder) {
        enc.put_bool(self.token_added);
    }

    fn decode_fields(dec: &mut Decoder<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            token_added: dec.read_bool("token_added")?,
        })
    }
}

/// Scratch account written by the fee calculation instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalculateFeeResult {
    /// Computed fee.
    pub fee: u64,
}

impl AccountLayout for CalculateFeeResult {
    const NAME: &'static str = "CalculateFeeResult";
    const LEN: usize = 8;

    fn encode_fields(&self, enc: &mut Encoder) {
        enc.put_u64(self.fee);
    }

    fn decode_fields(dec: &mut Decoder<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            fee: dec.read_u64()?,
        })
    }
}
