//! TransferRequest instruction builder.
//!
//! Builds the instruction that locks tokens in the bridge token account for a
//! transfer to another chain.

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

/// Builder for the TransferRequest instruction.
#[derive(Debug, Clone)]
pub struct TransferRequestBuilder {
    program_id: Pubkey,
    source_authority: Option<Pubkey>,
    source_token_account: Option<Pubkey>,
    mint: Option<Pubkey>,
    fee_result_account: Option<Pubkey>,
    to: Option<Pubkey>,
    token_index: u64,
    amount: u64,
    chain_id: u64,
}

impl TransferRequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            source_authority: None,
            source_token_account: None,
            mint: None,
            fee_result_account: None,
            to: None,
            token_index: 0,
            amount: 0,
            chain_id: 0,
        }
    }

    /// Sets the authority of the source token account.
    #[must_use]
    pub fn source_authority(mut self, authority: Pubkey) -> Self {
        self.source_authority = Some(authority);
        self
    }

    /// Sets the token account the tokens are taken from.
    #[must_use]
    pub fn source_token_account(mut self, account: Pubkey) -> Self {
        self.source_token_account = Some(account);
        self
    }

    /// Sets the token mint.
    #[must_use]
    pub fn mint(mut self, mint: Pubkey) -> Self {
        self.mint = Some(mint);
        self
    }

    /// Sets the scratch account that receives the computed fee.
    #[must_use]
    pub fn fee_result_account(mut self, account: Pubkey) -> Self {
        self.fee_result_account = Some(account);
        self
    }

    /// Sets the recipient on the destination chain.
    #[must_use]
    pub fn to(mut self, to: Pubkey) -> Self {
        self.to = Some(to);
        self
    }

    /// Sets the token index.
    #[must_use]
    pub fn token_index(mut self, token_index: u64) -> Self {
        self.token_index = token_index;
        self
    }

    /// Sets the amount to lock.
    #[must_use]
    pub fn amount(mut self, amount: u64) -> Self {
        self.amount = amount;
        self
    }

    /// Sets the destination chain id.
    #[must_use]
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Builds the instruction.
    ///
    /// # Errors
    ///
    /// Returns an error if any required field is not set or derivation fails.
    pub fn build(self) -> Result<Instruction, SdkError> {
        let source_authority = self
            .source_authority
            .ok_or(SdkError::MissingField("source_authority"))?;
        let source_token_account = self
            .source_token_account
            .ok_or(SdkError::MissingField("source_token_account"))?;
        let mint = self.mint.ok_or(SdkError::MissingField("mint"))?;
        let fee_result_account = self
            .fee_result_account
            .ok_or(SdkError::MissingField("fee_result_account"))?;
        let to = self.to.ok_or(SdkError::MissingField("to"))?;

        let (bridge, _) = derive_bridge_address(&self.program_id)?;
        let (token_list, _) = derive_token_list_address(&self.program_id, self.token_index)?;
        let (bridge_token_account, _) =
            derive_bridge_token_account_address(&self.program_id, &mint)?;

        let accounts = vec![
            AccountMeta::new(bridge, false),
            AccountMeta::new(token_list, false),
            AccountMeta::new_readonly(mint, false),
            AccountMeta::new(source_token_account, false),
            AccountMeta::new(fee_result_account, false),
            AccountMeta::new(bridge_token_account, false),
            AccountMeta::new_readonly(source_authority, true),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ];

        let data = BridgeInstruction::TransferRequest {
            token_index: self.token_index,
            to,
            amount: self.amount,
            chain_id: self.chain_id,
        }
        .encode()?;

        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data,
        })
    }
}
