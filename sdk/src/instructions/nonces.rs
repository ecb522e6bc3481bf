//! Allocation of WPOKT nonce and authorization state PDAs.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    sysvar,
};

use crate::error::SdkError;

use super::pda::{derive_authorization_address, derive_nonce_address};
use super::wpokt::WpoktInstruction;
use super::SYSTEM_PROGRAM_ID;

fn allocation(
    program_id: &Pubkey,
    payer: &Pubkey,
    authority: &Pubkey,
    pda: Pubkey,
    mint: &Pubkey,
    ix: WpoktInstruction,
) -> Result<Instruction, SdkError> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*payer, true),
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new(pda, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
            AccountMeta::new(SYSTEM_PROGRAM_ID, false),
        ],
        data: ix.encode()?,
    })
}

/// Allocates the permit nonce entry of `owner`.
///
/// # Errors
///
/// Returns an error if derivation or encoding fails.
pub fn initialize_nonce_account(
    program_id: &Pubkey,
    payer: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<Instruction, SdkError> {
    let (nonce_account, _) = derive_nonce_address(program_id, owner, mint)?;
    allocation(
        program_id,
        payer,
        owner,
        nonce_account,
        mint,
        WpoktInstruction::InitializeNonceAccount { owner: *owner },
    )
}

/// Allocates the authorization state of (`from`, `nonce`).
///
/// # Errors
///
/// Returns an error if derivation or encoding fails.
pub fn initialize_authorization_state(
    program_id: &Pubkey,
    payer: &Pubkey,
    from: &Pubkey,
    nonce: &[u8; 32],
    mint: &Pubkey,
) -> Result<Instruction, SdkError> {
    let (authorization, _) = derive_authorization_address(program_id, from, nonce, mint)?;
    allocation(
        program_id,
        payer,
        from,
        authorization,
        mint,
        WpoktInstruction::InitializeAuthorizationState {
            from: *from,
            nonce: *nonce,
        },
    )
}
