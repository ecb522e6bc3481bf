//! Harness session.
//!
//! A [`Session`] bundles the ledger connection, the fee payer and the
//! configuration. It is passed explicitly to every operation and verifier.

use std::path::Path;

use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use solana_program_pack::Pack;
use tracing::{debug, info};
use wpokt_bridge_sdk::instructions::TOKEN_PROGRAM_ID;
use wpokt_bridge_sdk::{unpack_token_record, AccountLayout};

use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::ledger::{AccountData, Ledger};
use crate::submitter::{SubmitterConfig, TransactionSubmitter};

/// Loads a keypair from a Solana CLI JSON file (an array of 64 bytes).
///
/// # Errors
///
/// Returns [`HarnessError::Keypair`] if the file cannot be read or does not
/// hold a valid keypair.
pub fn load_keypair(path: impl AsRef<Path>) -> Result<Keypair, HarnessError> {
    let path = path.as_ref();
    let keypair_error = |message: String| HarnessError::Keypair {
        path: path.display().to_string(),
        message,
    };

    let contents = std::fs::read_to_string(path).map_err(|e| keypair_error(e.to_string()))?;
    parse_keypair(&contents).map_err(keypair_error)
}

/// Parses the JSON byte-array keypair format.
fn parse_keypair(contents: &str) -> Result<Keypair, String> {
    let bytes: Vec<u8> = serde_json::from_str(contents).map_err(|e| e.to_string())?;
    Keypair::try_from(bytes.as_slice()).map_err(|e| e.to_string())
}

/// Explicit context for harness operations.
#[derive(Debug)]
pub struct Session<L> {
    ledger: L,
    payer: Keypair,
    config: HarnessConfig,
    submitter: TransactionSubmitter,
}

impl<L: Ledger> Session<L> {
    /// Creates a new session.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(ledger: L, payer: Keypair, config: HarnessConfig) -> Result<Self, HarnessError> {
        config.validate()?;
        let submitter = TransactionSubmitter::new(SubmitterConfig::from(&config));

        Ok(Self {
            ledger,
            payer,
            config,
            submitter,
        })
    }

    /// Returns the ledger connection.
    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Returns the fee payer.
    #[must_use]
    pub const fn payer(&self) -> &Keypair {
        &self.payer
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Returns the bridge program id.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not configured.
    pub fn bridge_program_id(&self) -> Result<Pubkey, HarnessError> {
        Ok(self.config.bridge_program_id()?)
    }

    /// Returns the WPOKT program id.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not configured.
    pub fn wpokt_program_id(&self) -> Result<Pubkey, HarnessError> {
        Ok(self.config.wpokt_program_id()?)
    }

    /// Submits `instructions` as one transaction paid by the session payer
    /// and waits for confirmation.
    ///
    /// # Errors
    ///
    /// Returns an error if signing, submission or confirmation fails.
    pub async fn submit(
        &self,
        label: &str,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<Signature, HarnessError> {
        info!("submitting {}", label);
        let confirmed = self
            .submitter
            .submit(&self.ledger, instructions, &self.payer, signers)
            .await?;
        info!("{} confirmed: {}", label, confirmed.signature);
        Ok(confirmed.signature)
    }

    /// Fetches an account that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::AccountNotFound`] if it does not.
    pub async fn fetch_account(&self, address: &Pubkey) -> Result<AccountData, HarnessError> {
        debug!("fetching {}", address);
        self.ledger
            .get_account(address)
            .await?
            .ok_or(HarnessError::AccountNotFound(*address))
    }

    /// Fetches an account that must be owned by `program_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is missing or owned by another
    /// program.
    pub async fn fetch_owned_account(
        &self,
        address: &Pubkey,
        program_id: &Pubkey,
    ) -> Result<AccountData, HarnessError> {
        let account = self.fetch_account(address).await?;
        if account.owner != *program_id {
            return Err(HarnessError::UnexpectedOwner {
                address: *address,
                owner: account.owner,
                expected: *program_id,
            });
        }
        Ok(account)
    }

    /// Fetches and decodes an account that must be owned by `program_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is missing, owned by another program,
    /// or does not decode.
    pub async fn fetch_owned<T: AccountLayout>(
        &self,
        address: &Pubkey,
        program_id: &Pubkey,
    ) -> Result<T, HarnessError> {
        let account = self.fetch_owned_account(address, program_id).await?;
        Ok(T::unpack(&account.data)?)
    }

    /// Fetches and decodes an SPL Token mint or token account.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is missing, not owned by the token
    /// program, or does not decode.
    pub async fn fetch_token<T: Pack>(&self, address: &Pubkey) -> Result<T, HarnessError> {
        let account = self.fetch_owned_account(address, &TOKEN_PROGRAM_ID).await?;
        Ok(unpack_token_record(&account.data)?)
    }

    /// Tops up the payer with an airdrop when its balance is below the
    /// configured minimum.
    ///
    /// Returns the airdrop signature, `None` if no airdrop was needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the balance query, the airdrop or its confirmation
    /// fails.
    pub async fn fund_payer(&self) -> Result<Option<Signature>, HarnessError> {
        let payer = self.payer.pubkey();
        let balance = self.ledger.get_balance(&payer).await?;
        if balance >= self.config.min_payer_balance {
            debug!("payer {} holds {} lamports", payer, balance);
            return Ok(None);
        }

        info!(
            "payer {} holds {} lamports, requesting {}",
            payer, balance, self.config.airdrop_lamports
        );
        let signature = self
            .ledger
            .request_airdrop(&payer, self.config.airdrop_lamports)
            .await?;
        self.submitter
            .wait_for_confirmation(&self.ledger, &signature)
            .await?;
        Ok(Some(signature))
    }

    /// Returns the rent-exempt balance for an account of `space` bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn rent_exempt(&self, space: usize) -> Result<u64, HarnessError> {
        self.ledger.minimum_balance_for_rent_exemption(space).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keypair_roundtrip() {
        let keypair = Keypair::new();
        let json = serde_json::to_string(&keypair.to_bytes().to_vec()).expect("json");
        let parsed = parse_keypair(&json).expect("parse");
        assert_eq!(parsed.pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_parse_keypair_rejects_short_input() {
        assert!(parse_keypair("[1, 2, 3]").is_err());
        assert!(parse_keypair("not json").is_err());
    }

    #[test]
    fn test_load_keypair_missing_file() {
        let result = load_keypair("/nonexistent/wpokt-bridge-harness/id.json");
        assert!(matches!(result, Err(HarnessError::Keypair { .. })));
    }
}
