//! WPOKT program instruction codec.

use solana_sdk::pubkey::Pubkey;

use crate::codec::{Decoder, Encoder, PUBKEY_LEN, U64_LEN};
use crate::error::SdkError;

/// Opcode bytes understood by the WPOKT program.
pub mod opcode {
    /// Create the mint state.
    pub const CONSTRUCT: u8 = 0;
    /// Mint tokens.
    pub const MINT: u8 = 1;
    /// Replace the minter.
    pub const CHANGE_MINTER: u8 = 2;
    /// Approve a spender against the owner's nonce.
    pub const PERMIT: u8 = 3;
    /// Move tokens under a one-time authorization.
    pub const TRANSFER_WITH_AUTHORIZATION: u8 = 4;
    /// Allocate the nonce entry of an owner.
    pub const INITIALIZE_NONCE_ACCOUNT: u8 = 5;
    /// Allocate the authorization state of a (signer, nonce) pair.
    pub const INITIALIZE_AUTHORIZATION_STATE: u8 = 6;
}

/// Instructions of the WPOKT program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WpoktInstruction {
    /// Creates the mint and the global state.
    Construct {
        /// First minter.
        initial_minter: Pubkey,
    },
    /// Mints tokens to a token account.
    Mint {
        /// Receiving token account.
        to: Pubkey,
        /// Amount in base units.
        value: u64,
    },
    /// Replaces the minter.
    ChangeMinter {
        /// New minter.
        new_minter: Pubkey,
    },
    /// Approves a spender, consuming one owner nonce.
    Permit {
        /// Token owner.
        owner: Pubkey,
        /// Approved spender.
        spender: Pubkey,
        /// Approved amount.
        value: u64,
        /// Unix deadline.
        deadline: u64,
    },
    /// Transfers tokens under a one-time authorization.
    TransferWithAuthorization {
        /// Source owner.
        from: Pubkey,
        /// Destination token account.
        to: Pubkey,
        /// Amount in base units.
        value: u64,
        /// Earliest valid unix time.
        valid_after: u64,
        /// Latest valid unix time.
        valid_before: u64,
        /// Authorization nonce.
        nonce: [u8; 32],
    },
    /// Allocates the nonce entry of an owner.
    InitializeNonceAccount {
        /// Nonce owner.
        owner: Pubkey,
    },
    /// Allocates the authorization state of a (signer, nonce) pair.
    InitializeAuthorizationState {
        /// Authorization signer.
        from: Pubkey,
        /// Authorization nonce.
        nonce: [u8; 32],
    },
}

impl WpoktInstruction {
    /// Returns the opcode byte.
    #[must_use]
    pub const fn opcode(&self) -> u8 {
        match self {
            Self::Construct { .. } => opcode::CONSTRUCT,
            Self::Mint { .. } => opcode::MINT,
            Self::ChangeMinter { .. } => opcode::CHANGE_MINTER,
            Self::Permit { .. } => opcode::PERMIT,
            Self::TransferWithAuthorization { .. } => opcode::TRANSFER_WITH_AUTHORIZATION,
            Self::InitializeNonceAccount { .. } => opcode::INITIALIZE_NONCE_ACCOUNT,
            Self::InitializeAuthorizationState { .. } => opcode::INITIALIZE_AUTHORIZATION_STATE,
        }
    }

    /// Returns the encoded length, opcode included.
    #[must_use]
    pub const fn span(&self) -> usize {
        let fields = match self {
            Self::Construct { .. }
            | Self::ChangeMinter { .. }
            | Self::InitializeNonceAccount { .. } => PUBKEY_LEN,
            Self::Mint { .. } => PUBKEY_LEN + U64_LEN,
            Self::Permit { .. } => 2 * PUBKEY_LEN + 2 * U64_LEN,
            Self::TransferWithAuthorization { .. } => 3 * PUBKEY_LEN + 3 * U64_LEN,
            Self::InitializeAuthorizationState { .. } => 2 * PUBKEY_LEN,
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
            Self::Construct { initial_minter } => {
                enc.put_pubkey(initial_minter);
            }
            Self::Mint { to, value } => {
                enc.put_pubkey(to).put_u64(*value);
            }
            Self::ChangeMinter { new_minter } => {
                enc.put_pubkey(new_minter);
            }
            Self::Permit {
                owner,
                spender,
                value,
                deadline,
            } => {
                enc.put_pubkey(owner)
                    .put_pubkey(spender)
                    .put_u64(*value)
                    .put_u64(*deadline);
            }
            Self::TransferWithAuthorization {
                from,
                to,
                value,
                valid_after,
                valid_before,
                nonce,
            } => {
                enc.put_pubkey(from)
                    .put_pubkey(to)
                    .put_u64(*value)
                    .put_u64(*valid_after)
                    .put_u64(*valid_before)
                    .put_bytes32(nonce);
            }
            Self::InitializeNonceAccount { owner } => {
                enc.put_pubkey(owner);
            }
            Self::InitializeAuthorizationState { from, nonce } => {
                enc.put_pubkey(from).put_bytes32(nonce);
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
                initial_minter: dec.read_pubkey()?,
            },
            opcode::MINT => Self::Mint {
                to: dec.read_pubkey()?,
                value: dec.read_u64()?,
            },
            opcode::CHANGE_MINTER => Self::ChangeMinter {
                new_minter: dec.read_pubkey()?,
            },
            opcode::PERMIT => Self::Permit {
                owner: dec.read_pubkey()?,
                spender: dec.read_pubkey()?,
                value: dec.read_u64()?,
                deadline: dec.read_u64()?,
            },
            opcode::TRANSFER_WITH_AUTHORIZATION => Self::TransferWithAuthorization {
                from: dec.read_pubkey()?,
                to: dec.read_pubkey()?,
                value: dec.read_u64()?,
                valid_after: dec.read_u64()?,
                valid_before: dec.read_u64()?,
                nonce: dec.read_bytes32()?,
            },
            opcode::INITIALIZE_NONCE_ACCOUNT => Self::InitializeNonceAccount {
                owner: dec.read_pubkey()?,
            },
            opcode::INITIALIZE_AUTHORIZATION_STATE => Self::InitializeAuthorizationState {
                from: dec.read_pubkey()?,
                nonce: dec.read_bytes32()?,
            },
            other => return Err(SdkError::UnknownOpcode(other)),
        };
        dec.finish()?;
        Ok(ix)
    }
}
