//! Permit instruction builder.
//!
//! Builds the instruction that approves a delegate token account against the
//! owner's current nonce.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    sysvar,
};

use crate::error::SdkError;

use super::pda::derive_nonce_address;
use super::wpokt::WpoktInstruction;
use super::TOKEN_PROGRAM_ID;

/// Builder for the Permit instruction.
#[derive(Debug, Clone)]
pub struct PermitBuilder {
    program_id: Pubkey,
    payer: Option<Pubkey>,
    owner: Option<Pubkey>,
    source_token_account: Option<Pubkey>,
    delegate_token_account: Option<Pubkey>,
    mint: Option<Pubkey>,
    nonce_account: Option<Pubkey>,
    value: u64,
    deadline: u64,
}

impl PermitBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            payer: None,
            owner: None,
            source_token_account: None,
            delegate_token_account: None,
            mint: None,
            nonce_account: None,
            value: 0,
            deadline: 0,
        }
    }

    /// Sets the fee payer.
    #[must_use]
    pub fn payer(mut self, payer: Pubkey) -> Self {
        self.payer = Some(payer);
        self
    }

    /// Sets the owner of the source token account.
    #[must_use]
    pub fn owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Sets the token account being approved from.
    #[must_use]
    pub fn source_token_account(mut self, account: Pubkey) -> Self {
        self.source_token_account = Some(account);
        self
    }

    /// Sets the delegate token account (the spender).
    #[must_use]
    pub fn delegate_token_account(mut self, account: Pubkey) -> Self {
        self.delegate_token_account = Some(account);
        self
    }

    /// Sets the WPOKT mint.
    #[must_use]
    pub fn mint(mut self, mint: Pubkey) -> Self {
        self.mint = Some(mint);
        self
    }

    /// Supplies the nonce entry explicitly; it must match the derived one.
    #[must_use]
    pub fn nonce_account(mut self, account: Pubkey) -> Self {
        self.nonce_account = Some(account);
        self
    }

    /// Sets the approved amount.
    #[must_use]
    pub fn value(mut self, value: u64) -> Self {
        self.value = value;
        self
    }

    /// Sets the unix deadline.
    #[must_use]
    pub fn deadline(mut self, deadline: u64) -> Self {
        self.deadline = deadline;
        self
    }

    /// Builds the instruction.
    ///
    /// # Errors
    ///
    /// Returns an error if any required field is not set, derivation fails, or
    /// a supplied nonce account differs from the derived address.
    pub fn build(self) -> Result<Instruction, SdkError> {
        let payer = self.payer.ok_or(SdkError::MissingField("payer"))?;
        let owner = self.owner.ok_or(SdkError::MissingField("owner"))?;
        let source_token_account = self
            .source_token_account
            .ok_or(SdkError::MissingField("source_token_account"))?;
        let delegate_token_account = self
            .delegate_token_account
            .ok_or(SdkError::MissingField("delegate_token_account"))?;
        let mint = self.mint.ok_or(SdkError::MissingField("mint"))?;

        let (nonce_account, _) = derive_nonce_address(&self.program_id, &owner, &mint)?;
        if let Some(supplied) = self.nonce_account {
            if supplied != nonce_account {
                return Err(SdkError::AddressMismatch {
                    account: "nonce_account",
                    expected: nonce_account.to_string(),
                    actual: supplied.to_string(),
                });
            }
        }

        let accounts = vec![
            AccountMeta::new_readonly(payer, true),
            AccountMeta::new_readonly(owner, true),
            AccountMeta::new(nonce_account, false),
            AccountMeta::new(source_token_account, false),
            AccountMeta::new(delegate_token_account, false),
            AccountMeta::new_readonly(mint, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(sysvar::clock::ID, false),
        ];

        let data = WpoktInstruction::Permit {
            owner,
            spender: delegate_token_account,
            value: self.value,
            deadline: self.deadline,
        }
        .encode()?;

        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data,
        })
    }
}
