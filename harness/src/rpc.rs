//! RPC ledger client.
//!
//! Wraps the nonblocking [`RpcClient`] so operations see the same
//! [`Ledger`] surface as the in-memory ledger used in tests. Every call is
//! made at the configured commitment.

use std::fmt;
use std::time::Duration;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction};
use tracing::debug;

use crate::config::{Commitment, HarnessConfig};
use crate::error::HarnessError;
use crate::ledger::{AccountData, Ledger, SignatureStatus};

/// Levels from strongest to weakest.
const LEVELS: [Commitment; 3] = [
    Commitment::Finalized,
    Commitment::Confirmed,
    Commitment::Processed,
];

/// Returns the strongest level accepted by `satisfies`.
fn strongest_level(satisfies: impl Fn(CommitmentConfig) -> bool) -> Option<Commitment> {
    LEVELS
        .into_iter()
        .find(|level| satisfies(level.config()))
}

/// Ledger client backed by a Solana JSON-RPC endpoint.
pub struct RpcLedger {
    client: RpcClient,
    commitment: Commitment,
}

impl fmt::Debug for RpcLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcLedger")
            .field("url", &self.client.url())
            .field("commitment", &self.commitment)
            .finish()
    }
}

impl RpcLedger {
    /// Creates a client for the configured endpoint.
    #[must_use]
    pub fn new(config: &HarnessConfig) -> Self {
        let client = RpcClient::new_with_timeout_and_commitment(
            config.rpc_url.clone(),
            Duration::from_millis(config.request_timeout_ms),
            config.commitment.config(),
        );
        Self {
            client,
            commitment: config.commitment,
        }
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn url(&self) -> String {
        self.client.url()
    }
}

impl Ledger for RpcLedger {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<AccountData>, HarnessError> {
        debug!("getAccountInfo {}", address);
        let response = self
            .client
            .get_account_with_commitment(address, self.commitment.config())
            .await?;

        Ok(response.value.map(|account| AccountData {
            lamports: account.lamports,
            owner: account.owner,
            data: account.data,
            executable: account.executable,
        }))
    }

    async fn get_balance(&self, address: &Pubkey) -> Result<u64, HarnessError> {
        Ok(self.client.get_balance(address).await?)
    }

    async fn latest_blockhash(&self) -> Result<Hash, HarnessError> {
        Ok(self.client.get_latest_blockhash().await?)
    }

    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature, HarnessError> {
        Ok(self.client.send_transaction(tx).await?)
    }

    async fn signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<SignatureStatus>, HarnessError> {
        let response = self
            .client
            .get_signature_statuses_with_history(&[*signature])
            .await?;

        Ok(response.value.into_iter().next().flatten().map(|status| {
            SignatureStatus {
                slot: status.slot,
                err: status.err.as_ref().map(ToString::to_string),
                confirmation: strongest_level(|level| status.satisfies_commitment(level)),
            }
        }))
    }

    async fn request_airdrop(&self, to: &Pubkey, lamports: u64) -> Result<Signature, HarnessError> {
        Ok(self.client.request_airdrop(to, lamports).await?)
    }

    async fn get_slot(&self) -> Result<u64, HarnessError> {
        Ok(self.client.get_slot().await?)
    }

    async fn minimum_balance_for_rent_exemption(&self, space: usize) -> Result<u64, HarnessError> {
        Ok(self
            .client
            .get_minimum_balance_for_rent_exemption(space)
            .await?)
    }
}
