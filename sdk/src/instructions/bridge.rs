//! Bridge program instruction codec.
//!
//! Every instruction is a one-byte opcode followed by fixed-width fields in
//! declaration order. Numbers are little-endian `u64`, keys are 32 raw bytes.

use solana_sdk::pubkey::Pubkey;

use crate::codec::{Decoder, Encoder, PUBKEY_LEN, U64_LEN};
use crate::error::SdkError;

/// Opcode bytes understood by the bridge program.
pub mod opcode {
    /// Construct the bridge.
    pub const CONSTRUCT: u8 = 0;
    /// Lock tokens for an outbound transfer.
    pub const TRANSFER_REQUEST: u8 = 1;
    /// Release tokens for an attested inbound transfer.
    pub const TRANSFER_RECEIPT: u8 = 2;
    /// Replace the attestation signer.
    pub const UPDATE_VERIFY_ADDRESS: u8 = 3;
    /// Set the daily limit of a token.
    pub const UPDATE_TOKEN_LIMIT: u8 = 4;
    /// Set the start of the limit window of a token.
    pub const SET_TOKEN_LIMIT_TIME: u8 = 5;
    /// Schedule a new stable fee.
    pub const UPDATE_STABLE_FEE: u8 = 6;
    /// Schedule a new token fee.
    pub const UPDATE_TOKEN_FEE: u8 = 7;
    /// Apply scheduled fees.
    pub const UPDATE_FEES: u8 = 8;
    /// Withdraw collected fees.
    pub const WITHDRAW_FEES: u8 = 9;
    /// Register a token.
    pub const ADD_TOKEN: u8 = 10;
    /// Pause a token.
    pub const PAUSE_TOKEN: u8 = 11;
    /// Unpause a token.
    pub const UNPAUSE_TOKEN: u8 = 12;
    /// Compute the fee of a transfer into a scratch account.
    pub const CALCULATE_FEE: u8 = 13;
    /// Drop ownership.
    pub const RENOUNCE_OWNERSHIP: u8 = 14;
    /// Hand ownership to another key.
    pub const TRANSFER_OWNERSHIP: u8 = 15;
    /// Allocate a claimed marker.
    pub const CREATE_CLAIMED_MARKER: u8 = 16;
    /// Allocate a daily-token-claims counter.
    pub const CREATE_DAILY_TOKEN_CLAIMS: u8 = 17;
}

/// Instructions of the bridge program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeInstruction {
    /// Creates the bridge state and registers the WPOKT mint at index 1.
    Construct {
        /// WPOKT mint.
        wpokt_mint: Pubkey,
        /// Attestation signer.
        verify_address: Pubkey,
        /// Chain id of this deployment.
        chain_id: u64,
        /// Initial stable fee.
        stable_fee: u64,
    },
    /// Locks tokens for a transfer to another chain.
    TransferRequest {
        /// Token index.
        token_index: u64,
        /// Recipient on the destination chain.
        to: Pubkey,
        /// Amount in base units.
        amount: u64,
        /// Destination chain id.
        chain_id: u64,
    },
    /// Releases tokens for a transfer from another chain.
    TransferReceipt {
        /// Token index.
        token_index: u64,
        /// Sender on the source chain.
        from: Pubkey,
        /// Recipient on this chain.
        to: Pubkey,
        /// Amount in base units.
        amount: u64,
        /// Source chain id.
        chain_id: u64,
        /// Transfer index on the source chain.
        index: u64,
        /// Attestation signer.
        signature_account: Pubkey,
    },
    /// Replaces the attestation signer.
    UpdateVerifyAddress {
        /// New signer.
        verify_address: Pubkey,
    },
    /// Sets the daily limit of a token.
    UpdateTokenLimit {
        /// Token index.
        token_index: u64,
        /// New limit.
        limit: u64,
    },
    /// Sets the start of the limit window of a token.
    SetTokenLimitTime {
        /// Token index.
        token_index: u64,
        /// Unix timestamp.
        timestamp: u64,
    },
    /// Schedules a new stable fee.
    UpdateStableFee {
        /// Scheduled fee.
        new_stable_fee: u64,
    },
    /// Schedules a new token fee.
    UpdateTokenFee {
        /// Token index.
        token_index: u64,
        /// Scheduled fee.
        new_token_fee: u64,
    },
    /// Applies scheduled fees whose time has come.
    UpdateFees {
        /// Token index.
        token_index: u64,
    },
    /// Withdraws collected fees to the owner.
    WithdrawFees {
        /// Token index.
        token_index: u64,
    },
    /// Registers a token.
    AddToken {
        /// Index to register under.
        token_index: u64,
        /// Token mint.
        token_address: Pubkey,
        /// Initial fee.
        fee: u64,
        /// Daily limit.
        limit: u64,
    },
    /// Pauses transfers of a token.
    PauseToken {
        /// Token index.
        token_index: u64,
    },
    /// Resumes transfers of a token.
    UnpauseToken {
        /// Token index.
        token_index: u64,
    },
    /// Writes the fee of a transfer into a result account.
    CalculateFee {
        /// Token index.
        token_index: u64,
        /// Transfer amount.
        amount: u64,
    },
    /// Drops ownership of the bridge.
    RenounceOwnership,
    /// Hands ownership of the bridge to another key.
    TransferOwnership {
        /// New owner.
        new_owner: Pubkey,
    },
    /// Allocates the claimed marker of one inbound transfer.
    CreateClaimedMarker {
        /// Transfer index.
        index: u64,
        /// Source chain id.
        chain_id: u64,
    },
    /// Allocates the daily-token-claims counter of a token.
    CreateDailyTokenClaims {
        /// Token index.
        token_index: u64,
    },
}

impl BridgeInstruction {
    /// Returns the opcode byte.
    #[must_use]
    pub const fn opcode(&self) -> u8 {
        match self {
            Self::Construct { .. } => opcode::CONSTRUCT,
            Self::TransferRequest { .. } => opcode::TRANSFER_REQUEST,
            Self::TransferReceipt { .. } => opcode::TRANSFER_RECEIPT,
            Self::UpdateVerifyAddress { .. } => opcode::UPDATE_VERIFY_ADDRESS,
            Self::UpdateTokenLimit { .. } => opcode::UPDATE_TOKEN_LIMIT,
            Self::SetTokenLimitTime { .. } => opcode::SET_TOKEN_LIMIT_TIME,
            Self::UpdateStableFee { .. } => opcode::UPDATE_STABLE_FEE,
            Self::UpdateTokenFee { .. } => opcode::UPDATE_TOKEN_FEE,
            Self::UpdateFees { .. } => opcode::UPDATE_FEES,
            Self::WithdrawFees { .. } => opcode::WITHDRAW_FEES,
            Self::AddToken { .. } => opcode::ADD_TOKEN,
            Self::PauseToken { .. } => opcode::PAUSE_TOKEN,
            Self::UnpauseToken { .. } => opcode::UNPAUSE_TOKEN,
            Self::CalculateFee { .. } => opcode::CALCULATE_FEE,
            Self::RenounceOwnership => opcode::RENOUNCE_OWNERSHIP,
            Self::TransferOwnership { .. } => opcode::TRANSFER_OWNERSHIP,
            Self::CreateClaimedMarker { .. } => opcode::CREATE_CLAIMED_MARKER,
            Self::CreateDailyTokenClaims { .. } => opcode::CREATE_DAILY_TOKEN_CLAIMS,
        }
    }

    /// Returns the encoded length, opcode included.
    #[must_use]
    pub const fn span(&self) -> usize {
        let fields = match self {
            Self::Construct { .. } => 2 * PUBKEY_LEN + 2 * U64_LEN,
            Self::TransferRequest { .. } => PUBKEY_LEN + 3 * U64_LEN,
            Self::TransferReceipt { .. } => 3 * PUBKEY_LEN + 4 * U64_LEN,
            Self::UpdateVerifyAddress { .. } | Self::TransferOwnership { .. } => PUBKEY_LEN,
            Self::UpdateTokenLimit { .. }
            | Self::SetTokenLimitTime { .. }
            | Self::UpdateTokenFee { .. }
            | Self::CalculateFee { .. }
            | Self::CreateClaimedMarker { .. } => 2 * U64_LEN,
            Self::UpdateStableFee { .. }
            | Self::UpdateFees { .. }
            | Self::WithdrawFees { .. }
            | Self::PauseToken { .. }
            | Self::UnpauseToken { .. }
            | Self::CreateDailyTokenClaims { .. } => U64_LEN,
            Self::AddToken { .. } => PUBKEY_LEN + 3 * U64_LEN,
            Self::RenounceOwnership => 0,
        };
        1 + fields
    }

    /// Encodes the instruction.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::SpanMismatch`] if the written length differs from
    /// [`Self::span`].
    pub fn encode(&self) -> Result<Vec<u8>, SdkError> {
        let mut enc = Encoder::with_span(self.span());
        enc.put_u8(self.opcode());
        match self {
            Self::Construct {
                wpokt_mint,
                verify_address,
                chain_id,
                stable_fee,
            } => {
                enc.put_pubkey(wpokt_mint)
                    .put_pubkey(verify_address)
                    .put_u64(*chain_id)
                    .put_u64(*stable_fee);
            }
            Self::TransferRequest {
                token_index,
                to,
                amount,
                chain_id,
            } => {
                enc.put_u64(*token_index)
                    .put_pubkey(to)
                    .put_u64(*amount)
                    .put_u64(*chain_id);
            }
            Self::TransferReceipt {
                token_index,
                from,
                to,
                amount,
                chain_id,
                index,
                signature_account,
            } => {
                enc.put_u64(*token_index)
                    .put_pubkey(from)
                    .put_pubkey(to)
                    .put_u64(*amount)
                    .put_u64(*chain_id)
                    .put_u64(*index)
                    .put_pubkey(signature_account);
            }
            Self::UpdateVerifyAddress { verify_address } => {
                enc.put_pubkey(verify_address);
            }
            Self::UpdateTokenLimit { token_index, limit } => {
                enc.put_u64(*token_index).put_u64(*limit);
            }
            Self::SetTokenLimitTime {
                token_index,
                timestamp,
            } => {
                enc.put_u64(*token_index).put_u64(*timestamp);
            }
            Self::UpdateStableFee { new_stable_fee } => {
                enc.put_u64(*new_stable_fee);
            }
            Self::UpdateTokenFee {
                token_index,
                new_token_fee,
            } => {
                enc.put_u64(*token_index).put_u64(*new_token_fee);
            }
            Self::UpdateFees { token_index }
            | Self::WithdrawFees { token_index }
            | Self::PauseToken { token_index }
            | Self::UnpauseToken { token_index }
            | Self::CreateDailyTokenClaims { token_index } => {
                enc.put_u64(*token_index);
            }
            Self::AddToken {
                token_index,
                token_address,
                fee,
                limit,
            } => {
                enc.put_u64(*token_index)
                    .put_pubkey(token_address)
                    .put_u64(*fee)
                    .put_u64(*limit);
            }
            Self::CalculateFee {
                token_index,
                amount,
            } => {
                enc.put_u64(*token_index).put_u64(*amount);
            }
            Self::RenounceOwnership => {}
            Self::TransferOwnership { new_owner } => {
                enc.put_pubkey(new_owner);
            }
            Self::CreateClaimedMarker { index, chain_id } => {
                enc.put_u64(*index).put_u64(*chain_id);
            }
        }
        enc.finish()
    }

    /// Decodes an instruction.
    ///
    /// # Errors
    ///
    /// Returns an error for empty data, an unknown opcode, short input or
    /// trailing bytes.
    pub fn decode(data: &[u8]) -> Result<Self, SdkError> {
        let mut dec = Decoder::new(data);
        let op = dec.read_u8().map_err(|_| SdkError::EmptyInstruction)?;
        let ix = match op {
            opcode::CONSTRUCT => Self::Construct {
                wpokt_mint: dec.read_pubkey()?,
                verify_address: dec.read_pubkey()?,
                chain_id: dec.read_u64()?,
                stable_fee: dec.read_u64()?,
            },
            opcode::TRANSFER_REQUEST => Self::TransferRequest {
                token_index: dec.read_u64()?,
                to: dec.read_pubkey()?,
                amount: dec.read_u64()?,
                chain_id: dec.read_u64()?,
            },
            opcode::TRANSFER_RECEIPT => Self::TransferReceipt {
                token_index: dec.read_u64()?,
                from: dec.read_pubkey()?,
                to: dec.read_pubkey()?,
                amount: dec.read_u64()?,
                chain_id: dec.read_u64()?,
                index: dec.read_u64()?,
                signature_account: dec.read_pubkey()?,
            },
            opcode::UPDATE_VERIFY_ADDRESS => Self::UpdateVerifyAddress {
                verify_address: dec.read_pubkey()?,
            },
            opcode::UPDATE_TOKEN_LIMIT => Self::UpdateTokenLimit {
                token_index: dec.read_u64()?,
                limit: dec.read_u64()?,
            },
            opcode::SET_TOKEN_LIMIT_TIME => Self::SetTokenLimitTime {
                token_index: dec.read_u64()?,
                timestamp: dec.read_u64()?,
            },
            opcode::UPDATE_STABLE_FEE => Self::UpdateStableFee {
                new_stable_fee: dec.read_u64()?,
            },
            opcode::UPDATE_TOKEN_FEE => Self::UpdateTokenFee {
                token_index: dec.read_u64()?,
                new_token_fee: dec.read_u64()?,
            },
            opcode::UPDATE_FEES => Self::UpdateFees {
                token_index: dec.read_u64()?,
            },
            opcode::WITHDRAW_FEES => Self::WithdrawFees {
                token_index: dec.read_u64()?,
            },
            opcode::ADD_TOKEN => Self::AddToken {
                token_index: dec.read_u64()?,
                token_address: dec.read_pubkey()?,
                fee: dec.read_u64()?,
                limit: dec.read_u64()?,
            },
            opcode::PAUSE_TOKEN => Self::PauseToken {
                token_index: dec.read_u64()?,
            },
            opcode::UNPAUSE_TOKEN => Self::UnpauseToken {
                token_index: dec.read_u64()?,
            },
            opcode::CALCULATE_FEE => Self::CalculateFee {
                token_index: dec.read_u64()?,
                amount: dec.read_u64()?,
            },
            opcode::RENOUNCE_OWNERSHIP => Self::RenounceOwnership,
            opcode::TRANSFER_OWNERSHIP => Self::TransferOwnership {
                new_owner: dec.read_pubkey()?,
            },
            opcode::CREATE_CLAIMED_MARKER => Self::CreateClaimedMarker {
                index: dec.read_u64()?,
                chain_id: dec.read_u64()?,
            },
            opcode::CREATE_DAILY_TOKEN_CLAIMS => Self::CreateDailyTokenClaims {
                token_index: dec.read_u64()?,
            },
            other => return Err(SdkError::UnknownOpcode(other)),
        };
        dec.finish()?;
        Ok(ix)
    }
}
