//! Ledger capability.
//!
//! Everything the harness needs from a Solana ledger, behind one trait so
//! operations run unchanged against the JSON-RPC client or an in-memory
//! ledger in tests.

use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction};

use crate::config::Commitment;
use crate::error::HarnessError;

/// Account as returned by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountData {
    /// Balance in lamports.
    pub lamports: u64,
    /// Owning program.
    pub owner: Pubkey,
    /// Raw account data.
    pub data: Vec<u8>,
    /// Whether the account holds a program.
    pub executable: bool,
}

/// Processing status of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureStatus {
    /// Slot the transaction was processed in.
    pub slot: u64,
    /// Execution error, verbatim, if the transaction failed.
    pub err: Option<String>,
    /// Commitment reached so far.
    pub confirmation: Option<Commitment>,
}

impl SignatureStatus {
    /// Returns true if the status reached `required` without error.
    #[must_use]
    pub fn is_confirmed(&self, required: Commitment) -> bool {
        self.err.is_none()
            && self
                .confirmation
                .is_some_and(|reached| reached.satisfies(required))
    }
}

/// Connection to a ledger.
#[allow(async_fn_in_trait)]
pub trait Ledger {
    /// Fetches an account, `None` if it does not exist.
    async fn get_account(&self, address: &Pubkey) -> Result<Option<AccountData>, HarnessError>;

    /// Returns the lamport balance of an address.
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, HarnessError>;

    /// Returns a recent blockhash to sign against.
    async fn latest_blockhash(&self) -> Result<Hash, HarnessError>;

    /// Submits a signed transaction.
    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature, HarnessError>;

    /// Returns the status of a transaction, `None` if the ledger has not seen it.
    async fn signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<SignatureStatus>, HarnessError>;

    /// Requests lamports from the faucet.
    async fn request_airdrop(&self, to: &Pubkey, lamports: u64) -> Result<Signature, HarnessError>;

    /// Returns the current slot.
    async fn get_slot(&self) -> Result<u64, HarnessError>;

    /// Returns the rent-exempt balance for `space` bytes.
    async fn minimum_balance_for_rent_exemption(&self, space: usize) -> Result<u64, HarnessError>;
}
