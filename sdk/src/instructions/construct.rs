//! Bridge Construct instruction builder.
//!
//! Builds the instruction that creates the bridge state, registers the WPOKT
//! mint at token index 1 and allocates the bridge token account.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    sysvar,
};

use crate::error::SdkError;

use super::bridge::BridgeInstruction;
use super::pda::BridgePdas;
use super::{SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID, WPOKT_TOKEN_INDEX};

/// Builder for the bridge Construct instruction.
#[derive(Debug, Clone)]
pub struct ConstructBuilder {
    program_id: Pubkey,
    owner: Option<Pubkey>,
    wpokt_mint: Option<Pubkey>,
    verify_address: Option<Pubkey>,
    chain_id: u64,
    stable_fee: u64,
}

impl ConstructBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            owner: None,
            wpokt_mint: None,
            verify_address: None,
            chain_id: 0,
            stable_fee: 0,
        }
    }

    /// Sets the bridge owner, who also pays for the new accounts.
    #[must_use]
    pub fn owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Sets the WPOKT mint.
    #[must_use]
    pub fn wpokt_mint(mut self, mint: Pubkey) -> Self {
        self.wpokt_mint = Some(mint);
        self
    }

    /// Sets the attestation signer.
    #[must_use]
    pub fn verify_address(mut self, verify_address: Pubkey) -> Self {
        self.verify_address = Some(verify_address);
        self
    }

    /// Sets the chain id of this deployment.
    #[must_use]
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Sets the initial stable fee.
    #[must_use]
    pub fn stable_fee(mut self, stable_fee: u64) -> Self {
        self.stable_fee = stable_fee;
        self
    }

    /// Builds the instruction.
    ///
    /// # Errors
    ///
    /// Returns an error if any required field is not set or derivation fails.
    pub fn build(self) -> Result<Instruction, SdkError> {
        let owner = self.owner.ok_or(SdkError::MissingField("owner"))?;
        let wpokt_mint = self.wpokt_mint.ok_or(SdkError::MissingField("wpokt_mint"))?;
        let verify_address = self
            .verify_address
            .ok_or(SdkError::MissingField("verify_address"))?;

        let pdas = BridgePdas::derive(&self.program_id, WPOKT_TOKEN_INDEX, &wpokt_mint)?;

        let accounts = vec![
            AccountMeta::new(owner, true),
            AccountMeta::new(pdas.bridge, false),
            AccountMeta::new(pdas.token_added, false),
            AccountMeta::new(pdas.token_list, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
            AccountMeta::new(pdas.bridge_token_account, false),
            AccountMeta::new_readonly(wpokt_mint, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ];

        let data = BridgeInstruction::Construct {
            wpokt_mint,
            verify_address,
            chain_id: self.chain_id,
            stable_fee: self.stable_fee,
        }
        .encode()?;

        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data,
        })
    }
}
