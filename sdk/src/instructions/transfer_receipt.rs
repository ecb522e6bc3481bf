//! TransferReceipt instruction builder.
//!
//! Builds the instruction that releases tokens for a transfer attested by the
//! bridge verify address.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::error::SdkError;

use super::bridge::BridgeInstruction;
use super::pda::{derive_bridge_address, derive_token_list_address, ClaimPdas};
use super::TOKEN_PROGRAM_ID;

/// Builder for the TransferReceipt instruction.
#[derive(Debug, Clone)]
pub struct TransferReceiptBuilder {
    program_id: Pubkey,
    receiver: Option<Pubkey>,
    from: Option<Pubkey>,
    signature_account: Option<Pubkey>,
    source_token_account: Option<Pubkey>,
    destination_token_account: Option<Pubkey>,
    mint: Option<Pubkey>,
    token_index: u64,
    amount: u64,
    chain_id: u64,
    index: u64,
}

impl TransferReceiptBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            receiver: None,
            from: None,
            signature_account: None,
            source_token_account: None,
            destination_token_account: None,
            mint: None,
            token_index: 0,
            amount: 0,
            chain_id: 0,
            index: 0,
        }
    }

    /// Sets the receiving authority, who submits and pays.
    #[must_use]
    pub fn receiver(mut self, receiver: Pubkey) -> Self {
        self.receiver = Some(receiver);
        self
    }

    /// Sets the sender on the source chain.
    #[must_use]
    pub fn from(mut self, from: Pubkey) -> Self {
        self.from = Some(from);
        self
    }

    /// Sets the attestation signer, which also authorizes the source tokens.
    #[must_use]
    pub fn signature_account(mut self, signer: Pubkey) -> Self {
        self.signature_account = Some(signer);
        self
    }

    /// Sets the token account the tokens are released from.
    #[must_use]
    pub fn source_token_account(mut self, account: Pubkey) -> Self {
        self.source_token_account = Some(account);
        self
    }

    /// Sets the token account receiving the tokens.
    #[must_use]
    pub fn destination_token_account(mut self, account: Pubkey) -> Self {
        self.destination_token_account = Some(account);
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

    /// Sets the amount released.
    #[must_use]
    pub fn amount(mut self, amount: u64) -> Self {
        self.amount = amount;
        self
    }

    /// Sets the source chain id.
    #[must_use]
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Sets the transfer index on the source chain.
    #[must_use]
    pub fn index(mut self, index: u64) -> Self {
        self.index = index;
        self
    }

    /// Builds the instruction.
    ///
    /// # Errors
    ///
    /// Returns an error if any required field is not set or derivation fails.
    pub fn build(self) -> Result<Instruction, SdkError> {
        let receiver = self.receiver.ok_or(SdkError::MissingField("receiver"))?;
        let from = self.from.ok_or(SdkError::MissingField("from"))?;
        let signature_account = self
            .signature_account
            .ok_or(SdkError::MissingField("signature_account"))?;
        let source_token_account = self
            .source_token_account
            .ok_or(SdkError::MissingField("source_token_account"))?;
        let destination_token_account = self
            .destination_token_account
            .ok_or(SdkError::MissingField("destination_token_account"))?;
        let mint = self.mint.ok_or(SdkError::MissingField("mint"))?;

        let (bridge, _) = derive_bridge_address(&self.program_id)?;
        let (token_list, _) = derive_token_list_address(&self.program_id, self.token_index)?;
        let claim = ClaimPdas::derive(&self.program_id, self.token_index, self.chain_id, self.index)?;

        let accounts = vec![
            AccountMeta::new(receiver, true),
            AccountMeta::new(bridge, false),
            AccountMeta::new(claim.claimed, false),
            AccountMeta::new(token_list, false),
            AccountMeta::new(claim.daily_token_claims, false),
            AccountMeta::new_readonly(signature_account, true),
            AccountMeta::new(source_token_account, false),
            AccountMeta::new(destination_token_account, false),
            AccountMeta::new_readonly(mint, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ];

        let data = BridgeInstruction::TransferReceipt {
            token_index: self.token_index,
            from,
            to: receiver,
            amount: self.amount,
            chain_id: self.chain_id,
            index: self.index,
            signature_account,
        }
        .encode()?;

        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data,
        })
    }
}
