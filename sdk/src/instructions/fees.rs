//! Fee maintenance instructions.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::error::SdkError;

use super::bridge::BridgeInstruction;
use super::pda::{derive_bridge_address, derive_token_list_address};

/// Applies scheduled stable and token fees whose time has come.
///
/// Permissionless; no signer besides the fee payer is required.
///
/// # Errors
///
/// Returns an error if derivation or encoding fails.
pub fn update_fees(program_id: &Pubkey, token_index: u64) -> Result<Instruction, SdkError> {
    let (bridge, _) = derive_bridge_address(program_id)?;
    let (token_list, _) = derive_token_list_address(program_id, token_index)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![AccountMeta::new(bridge, false), AccountMeta::new(token_list, false)],
        data: BridgeInstruction::UpdateFees { token_index }.encode()?,
    })
}

/// Writes the fee of moving `amount` of a token into `result_account`.
///
/// `result_account` must be owned by the bridge program and hold a
/// [`CalculateFeeResult`](crate::state::CalculateFeeResult).
///
/// # Errors
///
/// Returns an error if derivation or encoding fails.
pub fn calculate_fee(
    program_id: &Pubkey,
    token_index: u64,
    amount: u64,
    result_account: &Pubkey,
) -> Result<Instruction, SdkError> {
    let (bridge, _) = derive_bridge_address(program_id)?;
    let (token_list, _) = derive_token_list_address(program_id, token_index)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(bridge, false),
            AccountMeta::new_readonly(token_list, false),
            AccountMeta::new(*result_account, false),
        ],
        data: BridgeInstruction::CalculateFee {
            token_index,
            amount,
        }
        .encode()?,
    })
}
