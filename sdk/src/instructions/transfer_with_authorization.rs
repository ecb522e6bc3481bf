//! TransferWithAuthorization instruction builder.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::error::SdkError;

use super::pda::derive_authorization_address;
use super::wpokt::WpoktInstruction;
use super::TOKEN_PROGRAM_ID;

/// Builder for the TransferWithAuthorization instruction.
#[derive(Debug, Clone)]
pub struct TransferWithAuthorizationBuilder {
    program_id: Pubkey,
    from: Option<Pubkey>,
    source_token_account: Option<Pubkey>,
    destination_token_account: Option<Pubkey>,
    mint: Option<Pubkey>,
    nonce: Option<[u8; 32]>,
    value: u64,
    valid_after: u64,
    valid_before: u64,
}

impl TransferWithAuthorizationBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            from: None,
            source_token_account: None,
            destination_token_account: None,
            mint: None,
            nonce: None,
            value: 0,
            valid_after: 0,
            valid_before: u64::MAX,
        }
    }

    /// Sets the authorizing owner of the source token account.
    #[must_use]
    pub fn from(mut self, from: Pubkey) -> Self {
        self.from = Some(from);
        self
    }

    /// Sets the source token account.
    #[must_use]
    pub fn source_token_account(mut self, account: Pubkey) -> Self {
        self.source_token_account = Some(account);
        self
    }

    /// Sets the destination token account.
    #[must_use]
    pub fn destination_token_account(mut self, account: Pubkey) -> Self {
        self.destination_token_account = Some(account);
        self
    }

    /// Sets the WPOKT mint.
    #[must_use]
    pub fn mint(mut self, mint: Pubkey) -> Self {
        self.mint = Some(mint);
        self
    }

    /// Sets the authorization nonce.
    #[must_use]
    pub fn nonce(mut self, nonce: [u8; 32]) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Sets the amount.
    #[must_use]
    pub fn value(mut self, value: u64) -> Self {
        self.value = value;
        self
    }

    /// Sets the validity window in unix seconds.
    #[must_use]
    pub fn valid_between(mut self, valid_after: u64, valid_before: u64) -> Self {
        self.valid_after = valid_after;
        self.valid_before = valid_before;
        self
    }

    /// Builds the instruction.
    ///
    /// # Errors
    ///
    /// Returns an error if any required field is not set or derivation fails.
    pub fn build(self) -> Result<Instruction, SdkError> {
        let from = self.from.ok_or(SdkError::MissingField("from"))?;
        let source_token_account = self
            .source_token_account
            .ok_or(SdkError::MissingField("source_token_account"))?;
        let destination_token_account = self
            .destination_token_account
            .ok_or(SdkError::MissingField("destination_token_account"))?;
        let mint = self.mint.ok_or(SdkError::MissingField("mint"))?;
        let nonce = self.nonce.ok_or(SdkError::MissingField("nonce"))?;

        let (authorization, _) =
            derive_authorization_address(&self.program_id, &from, &nonce, &mint)?;

        let accounts = vec![
            AccountMeta::new(authorization, false),
            AccountMeta::new(mint, false),
            AccountMeta::new(source_token_account, false),
            AccountMeta::new_readonly(from, true),
            AccountMeta::new(destination_token_account, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ];

        let data = WpoktInstruction::TransferWithAuthorization {
            from,
            to: destination_token_account,
            value: self.value,
            valid_after: self.valid_after,
            valid_before: self.valid_before,
            nonce,
        }
        .encode()?;

        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data,
        })
    }
}
