//! Owner-only bridge instructions.
//!
//! These instructions take the bridge owner as the first account and touch
//! either the bridge state alone or a single token-list entry.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::error::SdkError;

use super::bridge::BridgeInstruction;
use super::pda::{derive_bridge_address, derive_token_list_address};

fn bridge_state_instruction(
    program_id: &Pubkey,
    owner: &Pubkey,
    ix: BridgeInstruction,
) -> Result<Instruction, SdkError> {
    let (bridge, _) = derive_bridge_address(program_id)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*owner, true),
            AccountMeta::new(bridge, false),
        ],
        data: ix.encode()?,
    })
}

fn token_entry_instruction(
    program_id: &Pubkey,
    owner: &Pubkey,
    token_index: u64,
    ix: BridgeInstruction,
) -> Result<Instruction, SdkError> {
    let (bridge, _) = derive_bridge_address(program_id)?;
    let (token_list, _) = derive_token_list_address(program_id, token_index)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*owner, true),
            AccountMeta::new_readonly(bridge, false),
            AccountMeta::new(token_list, false),
        ],
        data: ix.encode()?,
    })
}

/// Replaces the attestation signer.
///
/// # Errors
///
/// Returns an error if derivation or encoding fails.
pub fn update_verify_address(
    program_id: &Pubkey,
    owner: &Pubkey,
    verify_address: &Pubkey,
) -> Result<Instruction, SdkError> {
    bridge_state_instruction(
        program_id,
        owner,
        BridgeInstruction::UpdateVerifyAddress {
            verify_address: *verify_address,
        },
    )
}

/// Schedules a new stable fee.
///
/// # Errors
///
/// Returns an error if derivation or encoding fails.
pub fn update_stable_fee(
    program_id: &Pubkey,
    owner: &Pubkey,
    new_stable_fee: u64,
) -> Result<Instruction, SdkError> {
    bridge_state_instruction(
        program_id,
        owner,
        BridgeInstruction::UpdateStableFee { new_stable_fee },
    )
}

/// Drops ownership of the bridge.
///
/// # Errors
///
/// Returns an error if derivation or encoding fails.
pub fn renounce_ownership(program_id: &Pubkey, owner: &Pubkey) -> Result<Instruction, SdkError> {
    bridge_state_instruction(program_id, owner, BridgeInstruction::RenounceOwnership)
}

/// Hands ownership of the bridge to `new_owner`.
///
/// # Errors
///
/// Returns an error if derivation or encoding fails.
pub fn transfer_ownership(
    program_id: &Pubkey,
    owner: &Pubkey,
    new_owner: &Pubkey,
) -> Result<Instruction, SdkError> {
    bridge_state_instruction(
        program_id,
        owner,
        BridgeInstruction::TransferOwnership {
            new_owner: *new_owner,
        },
    )
}

/// Sets the daily claim limit of a token.
///
/// # Errors
///
/// Returns an error if derivation or encoding fails.
pub fn update_token_limit(
    program_id: &Pubkey,
    owner: &Pubkey,
    token_index: u64,
    limit: u64,
) -> Result<Instruction, SdkError> {
    token_entry_instruction(
        program_id,
        owner,
        token_index,
        BridgeInstruction::UpdateTokenLimit { token_index, limit },
    )
}

/// Sets the start of the limit window of a token.
///
/// # Errors
///
/// Returns an error if derivation or encoding fails.
pub fn set_token_limit_time(
    program_id: &Pubkey,
    owner: &Pubkey,
    token_index: u64,
    timestamp: u64,
) -> Result<Instruction, SdkError> {
    token_entry_instruction(
        program_id,
        owner,
        token_index,
        BridgeInstruction::SetTokenLimitTime {
            token_index,
            timestamp,
        },
    )
}

/// Schedules a new fee for a token.
///
/// # Errors
///
/// Returns an error if derivation or encoding fails.
pub fn update_token_fee(
    program_id: &Pubkey,
    owner: &Pubkey,
    token_index: u64,
    new_token_fee: u64,
) -> Result<Instruction, SdkError> {
    token_entry_instruction(
        program_id,
        owner,
        token_index,
        BridgeInstruction::UpdateTokenFee {
            token_index,
            new_token_fee,
        },
    )
}

/// Pauses transfers of a token.
///
/// # Errors
///
/// Returns an error if derivation or encoding fails.
pub fn pause_token(
    program_id: &Pubkey,
    owner: &Pubkey,
    token_index: u64,
) -> Result<Instruction, SdkError> {
    token_entry_instruction(
        program_id,
        owner,
        token_index,
        BridgeInstruction::PauseToken { token_index },
    )
}

/// Resumes transfers of a token.
///
/// # Errors
///
/// Returns an error if derivation or encoding fails.
pub fn unpause_token(
    program_id: &Pubkey,
    owner: &Pubkey,
    token_index: u64,
) -> Result<Instruction, SdkError> {
    token_entry_instruction(
        program_id,
        owner,
        token_index,
        BridgeInstruction::UnpauseToken { token_index },
    )
}
