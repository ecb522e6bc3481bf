//! WPOKT construction and minter instructions.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    sysvar,
};

use crate::error::SdkError;

use super::pda::derive_wpokt_address;
use super::wpokt::WpoktInstruction;
use super::{SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};

/// Creates the WPOKT global state for an allocated, uninitialized mint.
///
/// The program initializes the mint with the global state as its authority
/// and records `initial_minter`.
///
/// # Errors
///
/// Returns an error if derivation or encoding fails.
pub fn construct(
    program_id: &Pubkey,
    payer: &Pubkey,
    mint: &Pubkey,
    initial_minter: &Pubkey,
) -> Result<Instruction, SdkError> {
    let (wpokt, _) = derive_wpokt_address(program_id, mint)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(*mint, false),
            AccountMeta::new(wpokt, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(*initial_minter, false),
        ],
        data: WpoktInstruction::Construct {
            initial_minter: *initial_minter,
        }
        .encode()?,
    })
}

/// Mints `value` tokens into `receiver_token_account`.
///
/// # Errors
///
/// Returns an error if derivation or encoding fails.
pub fn mint_to(
    program_id: &Pubkey,
    minter: &Pubkey,
    mint: &Pubkey,
    receiver_token_account: &Pubkey,
    value: u64,
) -> Result<Instruction, SdkError> {
    let (wpokt, _) = derive_wpokt_address(program_id, mint)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*minter, true),
            AccountMeta::new_readonly(wpokt, false),
            AccountMeta::new(*mint, false),
            AccountMeta::new(*receiver_token_account, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        data: WpoktInstruction::Mint {
            to: *receiver_token_account,
            value,
        }
        .encode()?,
    })
}

/// Hands the minter role to `new_minter`.
///
/// # Errors
///
/// Returns an error if derivation or encoding fails.
pub fn change_minter(
    program_id: &Pubkey,
    current_minter: &Pubkey,
    mint: &Pubkey,
    new_minter: &Pubkey,
) -> Result<Instruction, SdkError> {
    let (wpokt, _) = derive_wpokt_address(program_id, mint)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*current_minter, true),
            AccountMeta::new(wpokt, false),
            AccountMeta::new(*mint, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new(*new_minter, false),
        ],
        data: WpoktInstruction::ChangeMinter {
            new_minter: *new_minter,
        }
        .encode()?,
    })
}
