//! SDK error types.
//!
//! Provides error types for address derivation, the instruction codec,
//! account decoding and state verification.

/// SDK errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SdkError {
    /// No bump seed produced an off-curve address.
    #[error("no valid bump seed for {0}")]
    DerivationExhausted(&'static str),

    /// Encoded instruction length differs from the declared span.
    #[error("span mismatch: expected {expected} bytes, wrote {actual}")]
    SpanMismatch {
        /// Declared span.
        expected: usize,
        /// Bytes actually written.
        actual: usize,
    },

    /// Account blob length differs from the layout span.
    #[error("{layout}: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        /// Layout name.
        layout: &'static str,
        /// Layout span.
        expected: usize,
        /// Length of the blob.
        actual: usize,
    },

    /// Input ended before a field could be read.
    #[error("truncated input: needed {needed} bytes at offset {offset}")]
    Truncated {
        /// Offset of the field.
        offset: usize,
        /// Width of the field.
        needed: usize,
    },

    /// Bytes left over after the last field.
    #[error("{0} trailing bytes")]
    TrailingBytes(usize),

    /// Boolean byte other than 0 or 1.
    #[error("invalid bool {value} for {field}")]
    InvalidBool {
        /// Field name.
        field: &'static str,
        /// Raw byte.
        value: u8,
    },

    /// SPL Token record that the token program layout rejects.
    #[error("{layout}: {message}")]
    TokenRecord {
        /// Record type.
        layout: &'static str,
        /// Decoder message.
        message: String,
    },

    /// Leading opcode byte not known to the program.
    #[error("unknown opcode {0}")]
    UnknownOpcode(u8),

    /// Empty instruction data.
    #[error("empty instruction data")]
    EmptyInstruction,

    /// Required builder input was not provided.
    #[error("{0} not set")]
    MissingField(&'static str),

    /// Supplied account does not match the derived address.
    #[error("{account}: expected {expected}, got {actual}")]
    AddressMismatch {
        /// Account role.
        account: &'static str,
        /// Derived address.
        expected: String,
        /// Supplied address.
        actual: String,
    },
}

/// A decoded record disagrees with the expected value.
///
/// Each variant names the field family that was checked and carries the
/// expected and observed values rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    /// Account initialization flag.
    #[error("initialization: expected {expected}, observed {observed}")]
    Initialization {
        /// Expected value.
        expected: String,
        /// Observed value.
        observed: String,
    },

    /// Account owner.
    #[error("owner: expected {expected}, observed {observed}")]
    Owner {
        /// Expected value.
        expected: String,
        /// Observed value.
        observed: String,
    },

    /// Token balance.
    #[error("balance: expected {expected}, observed {observed}")]
    Balance {
        /// Expected value.
        expected: String,
        /// Observed value.
        observed: String,
    },

    /// Token address of a token-list entry.
    #[error("token address: expected {expected}, observed {observed}")]
    TokenAddress {
        /// Expected value.
        expected: String,
        /// Observed value.
        observed: String,
    },

    /// Nonce counter or nonce bytes.
    #[error("nonce: expected {expected}, observed {observed}")]
    Nonce {
        /// Expected value.
        expected: String,
        /// Observed value.
        observed: String,
    },

    /// Token account delegate.
    #[error("delegate: expected {expected}, observed {observed}")]
    Delegate {
        /// Expected value.
        expected: String,
        /// Observed value.
        observed: String,
    },

    /// Token account delegated amount.
    #[error("delegated amount: expected {expected}, observed {observed}")]
    DelegatedAmount {
        /// Expected value.
        expected: String,
        /// Observed value.
        observed: String,
    },

    /// Authorization state flag or signer.
    #[error("authorization: expected {expected}, observed {observed}")]
    Authorization {
        /// Expected value.
        expected: String,
        /// Observed value.
        observed: String,
    },

    /// WPOKT minter.
    #[error("minter: expected {expected}, observed {observed}")]
    Minter {
        /// Expected value.
        expected: String,
        /// Observed value.
        observed: String,
    },

    /// Mint address.
    #[error("mint: expected {expected}, observed {observed}")]
    Mint {
        /// Expected value.
        expected: String,
        /// Observed value.
        observed: String,
    },

    /// Claimed marker.
    #[error("claimed: expected {expected}, observed {observed}")]
    Claimed {
        /// Expected value.
        expected: String,
        /// Observed value.
        observed: String,
    },

    /// Daily token claims counter.
    #[error("daily claims: expected {expected}, observed {observed}")]
    DailyClaims {
        /// Expected value.
        expected: String,
        /// Observed value.
        observed: String,
    },

    /// Bridge chain id.
    #[error("chain id: expected {expected}, observed {observed}")]
    ChainId {
        /// Expected value.
        expected: String,
        /// Observed value.
        observed: String,
    },

    /// Bridge verify address.
    #[error("verify address: expected {expected}, observed {observed}")]
    VerifyAddress {
        /// Expected value.
        expected: String,
        /// Observed value.
        observed: String,
    },

    /// Mint authority.
    #[error("mint authority: expected {expected}, observed {observed}")]
    MintAuthority {
        /// Expected value.
        expected: String,
        /// Observed value.
        observed: String,
    },

    /// Mint decimals.
    #[error("decimals: expected {expected}, observed {observed}")]
    Decimals {
        /// Expected value.
        expected: String,
        /// Observed value.
        observed: String,
    },

    /// Mint supply.
    #[error("supply: expected {expected}, observed {observed}")]
    Supply {
        /// Expected value.
        expected: String,
        /// Observed value.
        observed: String,
    },

    /// Token paused flag.
    #[error("paused: expected {expected}, observed {observed}")]
    Paused {
        /// Expected value.
        expected: String,
        /// Observed value.
        observed: String,
    },

    /// Bridge outbound transfer index.
    #[error("transfer index: expected {expected}, observed {observed}")]
    TransferIndex {
        /// Expected value.
        expected: String,
        /// Observed value.
        observed: String,
    },

    /// Fee fields of a token-list entry or the bridge.
    #[error("fee: expected {expected}, observed {observed}")]
    Fee {
        /// Expected value.
        expected: String,
        /// Observed value.
        observed: String,
    },
}
