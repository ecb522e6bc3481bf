//! Allocation of per-transfer and per-token bridge PDAs.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    sysvar,
};

use crate::error::SdkError;

use super::bridge::BridgeInstruction;
use super::pda::{derive_claimed_address, derive_daily_token_claims_address};
use super::SYSTEM_PROGRAM_ID;

fn allocation(
    program_id: &Pubkey,
    payer: &Pubkey,
    pda: Pubkey,
    ix: BridgeInstruction,
) -> Result<Instruction, SdkError> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(pda, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
        data: ix.encode()?,
    })
}

/// Allocates the claimed marker of inbound transfer `index` from `chain_id`.
///
/// # Errors
///
/// Returns an error if derivation or encoding fails.
pub fn create_claimed_marker(
    program_id: &Pubkey,
    payer: &Pubkey,
    index: u64,
    chain_id: u64,
) -> Result<Instruction, SdkError> {
    let (claimed, _) = derive_claimed_address(program_id, chain_id, index)?;
    allocation(
        program_id,
        payer,
        claimed,
        BridgeInstruction::CreateClaimedMarker { index, chain_id },
    )
}

/// Allocates the daily-token-claims counter of a token.
///
/// # Errors
///
/// Returns an error if derivation or encoding fails.
pub fn create_daily_token_claims(
    program_id: &Pubkey,
    payer: &Pubkey,
    token_index: u64,
) -> Result<Instruction, SdkError> {
    let (daily, _) = derive_daily_token_claims_address(program_id, token_index)?;
    allocation(
        program_id,
        payer,
        daily,
        BridgeInstruction::CreateDailyTokenClaims { token_index },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_claimed_marker() {
        let program_id = Pubkey::new_unique();
        let payer = Pubkey::new_unique();
        let ix = create_claimed_marker(&program_id, &payer, 3, 1).expect("build");

        assert_eq!(ix.accounts.len(), 4);
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert_eq!(
            ix.accounts[1].pubkey,
            derive_claimed_address(&program_id, 1, 3).expect("derive").0
        );
        assert_eq!(ix.accounts[2].pubkey, sysvar::rent::ID);
        assert_eq!(
            BridgeInstruction::decode(&ix.data),
            Ok(BridgeInstruction::CreateClaimedMarker {
                index: 3,
                chain_id: 1
            })
        );
    }

    #[test]
    fn test_create_daily_token_claims() {
        let program_id = Pubkey::new_unique();
        let ix = create_daily_token_claims(&program_id, &Pubkey::new_unique(), 2).expect("build");
        assert_eq!(
            ix.accounts[1].pubkey,
            derive_daily_token_claims_address(&program_id, 2)
                .expect("derive")
                .0
        );
        assert_eq!(ix.data.len(), 9);
    }
}
