//! WithdrawFees instruction builder.
//!
//! Builds the owner-only instruction that moves collected fees from the
//! bridge token account to an owner token account.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::error::SdkError;

use super::bridge::BridgeInstruction;
use super::pda::{
    derive_bridge_address, derive_bridge_token_account_address, derive_token_list_address,
};
use super::TOKEN_PROGRAM_ID;

/// Builder for the WithdrawFees instruction.
#[derive(Debug, Clone)]
pub struct WithdrawFeesBuilder {
    program_id: Pubkey,
    owner: Option<Pubkey>,
    owner_token_account: Option<Pubkey>,
    mint: Option<Pubkey>,
    token_index: u64,
}

impl WithdrawFeesBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            owner: None,
            owner_token_account: None,
            mint: None,
            token_index: 0,
        }
    }

    /// Sets the bridge owner.
    #[must_use]
    pub fn owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Sets the token account receiving the fees.
    #[must_use]
    pub fn owner_token_account(mut self, account: Pubkey) -> Self {
        self.owner_token_account = Some(account);
        self
    }

    /// Sets the token mint.
    #[must_use]
    pub fn mint(mut self, mint: Pubkey) -> Self {
        self.mint = Some(mint);
        self
    }

    /// Sets the token index.
    #[must_use]
    pub fn token_index(mut self, token_index: u64) -> Self {
        self.token_index = token_index;
        self
    }

    /// Builds the instruction.
    ///
    /// # Errors
    ///
    /// Returns an error if any required field is not set or derivation fails.
    pub fn build(self) -> Result<Instruction, SdkError> {
        let owner = self.owner.ok_or(SdkError::MissingField("owner"))?;
        let owner_token_account = self
            .owner_token_account
            .ok_or(SdkError::MissingField("owner_token_account"))?;
        let mint = self.mint.ok_or(SdkError::MissingField("mint"))?;

        let (bridge, _) = derive_bridge_address(&self.program_id)?;
        let (bridge_token_account, _) =
            derive_bridge_token_account_address(&self.program_id, &mint)?;
        let (token_list, _) = derive_token_list_address(&self.program_id, self.token_index)?;

        let accounts = vec![
            AccountMeta::new(owner, true),
            AccountMeta::new(owner_token_account, false),
            AccountMeta::new_readonly(bridge, false),
            AccountMeta::new(bridge_token_account, false),
            AccountMeta::new(mint, false),
            AccountMeta::new(token_list, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ];

        let data = BridgeInstruction::WithdrawFees {
            token_index: self.token_index,
        }
        .encode()?;

        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data,
        })
    }
}
