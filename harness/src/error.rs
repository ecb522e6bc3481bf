//! Harness error types.

use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::rpc_request::RpcError;
use solana_sdk::pubkey::Pubkey;
use wpokt_bridge_sdk::{SdkError, VerifyError};

use crate::config::ConfigError;

/// Harness errors.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// The RPC request could not be completed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The ledger answered with a JSON-RPC error object.
    #[error("rpc error [{code}]: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Message as returned by the ledger.
        message: String,
    },

    /// Expected account does not exist.
    #[error("account not found: {0}")]
    AccountNotFound(Pubkey),

    /// Account exists but is owned by another program.
    #[error("account {address} is owned by {owner}, expected {expected}")]
    UnexpectedOwner {
        /// Account address.
        address: Pubkey,
        /// Actual owner.
        owner: Pubkey,
        /// Expected owner.
        expected: Pubkey,
    },

    /// The transaction was executed and failed.
    #[error("transaction {signature} failed: {message}")]
    TransactionFailed {
        /// Transaction signature.
        signature: String,
        /// Ledger error, verbatim.
        message: String,
    },

    /// The transaction did not reach the required commitment in time.
    #[error("transaction {signature} not confirmed after {timeout_ms}ms")]
    ConfirmationTimeout {
        /// Transaction signature.
        signature: String,
        /// Configured timeout.
        timeout_ms: u64,
    },

    /// Program account is missing from the ledger.
    #[error("program {0} is not deployed")]
    ProgramNotDeployed(Pubkey),

    /// Program account exists but is not marked executable.
    #[error("program account {0} is not executable")]
    ProgramNotExecutable(Pubkey),

    /// A third-party instruction builder rejected its inputs.
    #[error("failed to build instruction: {0}")]
    Instruction(String),

    /// Signing failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Keypair file could not be loaded.
    #[error("failed to load keypair from {path}: {message}")]
    Keypair {
        /// File path.
        path: String,
        /// Cause.
        message: String,
    },

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Derivation, codec or builder failure.
    #[error(transparent)]
    Sdk(#[from] SdkError),

    /// State check failed.
    #[error("verification failed: {0}")]
    Verify(#[from] VerifyError),

    /// An offline scenario step produced an unexpected result.
    #[error("scenario check failed: {0}")]
    Scenario(String),
}

impl From<ClientError> for HarnessError {
    fn from(err: ClientError) -> Self {
        match err.kind() {
            ClientErrorKind::RpcError(RpcError::RpcResponseError { code, message, .. }) => {
                Self::Rpc {
                    code: *code,
                    message: message.clone(),
                }
            }
            _ => Self::Transport(err.to_string()),
        }
    }
}
