//! Transaction submission.
//!
//! Signs a set of instructions against a fresh blockhash, sends the
//! transaction once and polls its status until it reaches the configured
//! commitment, fails, or the confirmation timeout elapses. Nothing is
//! retried: a failure is returned to the caller as the ledger reported it.

use std::time::Duration;

use solana_sdk::{
    instruction::Instruction,
    message::Message,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::config::{Commitment, HarnessConfig};
use crate::error::HarnessError;
use crate::ledger::Ledger;

/// Configuration for the transaction submitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitterConfig {
    /// Commitment a transaction must reach.
    pub commitment: Commitment,

    /// Poll interval in milliseconds.
    pub poll_interval_ms: u64,

    /// Confirmation timeout in milliseconds.
    pub confirmation_timeout_ms: u64,
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        Self {
            commitment: Commitment::Confirmed,
            poll_interval_ms: 500,
            confirmation_timeout_ms: 60_000,
        }
    }
}

impl From<&HarnessConfig> for SubmitterConfig {
    fn from(config: &HarnessConfig) -> Self {
        Self {
            commitment: config.commitment,
            poll_interval_ms: config.poll_interval_ms,
            confirmation_timeout_ms: config.confirmation_timeout_ms,
        }
    }
}

/// A transaction that reached the required commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmed {
    /// Transaction signature.
    pub signature: Signature,
    /// Slot the transaction was processed in.
    pub slot: u64,
}

/// Transaction submitter.
#[derive(Debug, Clone, Default)]
pub struct TransactionSubmitter {
    config: SubmitterConfig,
}

impl TransactionSubmitter {
    /// Creates a new transaction submitter.
    #[must_use]
    pub const fn new(config: SubmitterConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &SubmitterConfig {
        &self.config
    }

    /// Builds and signs a transaction paid by `payer`.
    ///
    /// Every key in `signers` that matches the payer or an earlier signer is
    /// skipped, so callers may pass the payer again.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Signing`] if a required signature is missing
    /// or a signer is not part of the message.
    pub fn sign(
        instructions: &[Instruction],
        payer: &Keypair,
        signers: &[&Keypair],
        blockhash: solana_sdk::hash::Hash,
    ) -> Result<Transaction, HarnessError> {
        let mut all: Vec<&Keypair> = Vec::with_capacity(signers.len() + 1);
        all.push(payer);
        for signer in signers {
            if !all.iter().any(|k| k.pubkey() == signer.pubkey()) {
                all.push(signer);
            }
        }

        let message = Message::new(instructions, Some(&payer.pubkey()));
        let mut tx = Transaction::new_unsigned(message);
        tx.try_sign(all.as_slice(), blockhash)
            .map_err(|e| HarnessError::Signing(e.to_string()))?;
        Ok(tx)
    }

    /// Signs, sends and confirms a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails, the ledger rejects the transaction,
    /// execution fails, or confirmation times out.
    pub async fn submit<L: Ledger>(
        &self,
        ledger: &L,
        instructions: &[Instruction],
        payer: &Keypair,
        signers: &[&Keypair],
    ) -> Result<Confirmed, HarnessError> {
        let blockhash = ledger.latest_blockhash().await?;
        let tx = Self::sign(instructions, payer, signers, blockhash)?;

        let signature = ledger.send_transaction(&tx).await?;
        debug!("sent transaction {}", signature);

        self.wait_for_confirmation(ledger, &signature).await
    }

    /// Polls the status of `signature` until it is confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::TransactionFailed`] if execution failed and
    /// [`HarnessError::ConfirmationTimeout`] if the commitment was not reached
    /// in time.
    pub async fn wait_for_confirmation<L: Ledger>(
        &self,
        ledger: &L,
        signature: &Signature,
    ) -> Result<Confirmed, HarnessError> {
        let timeout = Duration::from_millis(self.config.confirmation_timeout_ms);
        let poll_interval = Duration::from_millis(self.config.poll_interval_ms);
        let started = Instant::now();

        loop {
            if let Some(status) = ledger.signature_status(signature).await? {
                if let Some(err) = status.err {
                    return Err(HarnessError::TransactionFailed {
                        signature: signature.to_string(),
                        message: err,
                    });
                }
                if status.is_confirmed(self.config.commitment) {
                    info!("confirmed {} at slot {}", signature, status.slot);
                    return Ok(Confirmed {
                        signature: *signature,
                        slot: status.slot,
                    });
                }
            }

            if started.elapsed() >= timeout {
                return Err(HarnessError::ConfirmationTimeout {
                    signature: signature.to_string(),
                    timeout_ms: self.config.confirmation_timeout_ms,
                });
            }

            tokio::time::sleep(poll_interval).await;
        }
    }
}
