//! AddToken instruction builder.
//!
//! Builds the owner-only instruction that registers a mint under a token
//! index and marks it as added.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    sysvar,
};

use crate::error::SdkError;

use super::bridge::BridgeInstruction;
use super::pda::{derive_bridge_address, derive_token_added_address, derive_token_list_address};
use super::SYSTEM_PROGRAM_ID;

/// Builder for the AddToken instruction.
#[derive(Debug, Clone)]
pub struct AddTokenBuilder {
    program_id: Pubkey,
    owner: Option<Pubkey>,
    mint: Option<Pubkey>,
    token_index: Option<u64>,
    fee: u64,
    limit: u64,
}

impl AddTokenBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            owner: None,
            mint: None,
            token_index: None,
            fee: 0,
            limit: 0,
        }
    }

    /// Sets the bridge owner, who pays for the new entries.
    #[must_use]
    pub fn owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Sets the mint to register.
    #[must_use]
    pub fn mint(mut self, mint: Pubkey) -> Self {
        self.mint = Some(mint);
        self
    }

    /// Sets the index to register under.
    #[must_use]
    pub fn token_index(mut self, token_index: u64) -> Self {
        self.token_index = Some(token_index);
        self
    }

    /// Sets the initial fee.
    #[must_use]
    pub fn fee(mut self, fee: u64) -> Self {
        self.fee = fee;
        self
    }

    /// Sets the daily limit.
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Builds the instruction.
    ///
    /// # Errors
    ///
    /// Returns an error if any required field is not set or derivation fails.
    pub fn build(self) -> Result<Instruction, SdkError> {
        let owner = self.owner.ok_or(SdkError::MissingField("owner"))?;
        let mint = self.mint.ok_or(SdkError::MissingField("mint"))?;
        let token_index = self
            .token_index
            .ok_or(SdkError::MissingField("token_index"))?;

        let (bridge, _) = derive_bridge_address(&self.program_id)?;
        let (token_list, _) = derive_token_list_address(&self.program_id, token_index)?;
        let (token_added, _) = derive_token_added_address(&self.program_id, &mint)?;

        let accounts = vec![
            AccountMeta::new(owner, true),
            AccountMeta::new_readonly(bridge, false),
            AccountMeta::new(token_list, false),
            AccountMeta::new(token_added, false),
            AccountMeta::new_readonly(mint, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ];

        let data = BridgeInstruction::AddToken {
            token_index,
            token_address: mint,
            fee: self.fee,
            limit: self.limit,
        }
        .encode()?;

        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_program_id() -> Pubkey {
        Pubkey::new_unique()
    }

    #[test]
    fn test_add_token_builder_build() {
        let program_id = test_program_id();
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let ix = AddTokenBuilder::new(program_id)
            .owner(owner)
            .mint(mint)
            .token_index(2)
            .fee(10)
            .limit(1_000)
            .build()
            .expect("should build instruction");

        assert_eq!(ix.accounts.len(), 7);
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert_eq!(
            ix.accounts[2].pubkey,
            derive_token_list_address(&program_id, 2).expect("derive").0
        );
        assert_eq!(
            ix.accounts[3].pubkey,
            derive_token_added_address(&program_id, &mint).expect("derive").0
        );
        assert_eq!(ix.accounts[4].pubkey, mint);
        assert_eq!(
            BridgeInstruction::decode(&ix.data),
            Ok(BridgeInstruction::AddToken {
                token_index: 2,
                token_address: mint,
                fee: 10,
                limit: 1_000
            })
        );
    }

    #[test]
    fn test_add_token_builder_requires_index() {
        let result = AddTokenBuilder::new(test_program_id())
            .owner(Pubkey::new_unique())
            .mint(Pubkey::new_unique())
            .build();
        assert_eq!(result, Err(SdkError::MissingField("token_index")));
    }
}
