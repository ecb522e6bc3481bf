//! Account allocation for test fixtures.

use solana_program_pack::Pack;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use solana_system_interface::instruction as system_instruction;
use spl_token_interface::instruction as token_instruction;
use wpokt_bridge_sdk::codec::U64_LEN;
use wpokt_bridge_sdk::instructions::TOKEN_PROGRAM_ID;
use wpokt_bridge_sdk::{MintAccount, TokenAccount};

use crate::error::HarnessError;
use crate::ledger::Ledger;
use crate::session::Session;

/// Allocates a rent-exempt account of `space` bytes owned by `owner`.
///
/// # Errors
///
/// Returns an error if the rent query or the transaction fails.
pub async fn create_program_account<L: Ledger>(
    session: &Session<L>,
    account: &Keypair,
    space: usize,
    owner: &Pubkey,
) -> Result<Signature, HarnessError> {
    let lamports = session.rent_exempt(space).await?;
    let ix = system_instruction::create_account(
        &session.payer().pubkey(),
        &account.pubkey(),
        lamports,
        space as u64,
        owner,
    );
    session
        .submit("create account", &[ix], &[account])
        .await
}

/// Allocates an uninitialized mint for the WPOKT program to initialize.
///
/// # Errors
///
/// Returns an error if the transaction fails.
pub async fn create_mint_account<L: Ledger>(
    session: &Session<L>,
    mint: &Keypair,
) -> Result<Signature, HarnessError> {
    create_program_account(session, mint, MintAccount::LEN, &TOKEN_PROGRAM_ID).await
}

/// Allocates the scratch account the bridge writes fee results into.
///
/// # Errors
///
/// Returns an error if the bridge program id is missing or the transaction
/// fails.
pub async fn create_fee_result_account<L: Ledger>(
    session: &Session<L>,
    account: &Keypair,
) -> Result<Signature, HarnessError> {
    let program_id = session.bridge_program_id()?;
    create_program_account(session, account, U64_LEN, &program_id).await
}

/// Creates and initializes a token account of `mint` owned by `owner`.
///
/// # Errors
///
/// Returns an error if the rent query or the transaction fails.
pub async fn create_token_account<L: Ledger>(
    session: &Session<L>,
    account: &Keypair,
    mint: &Pubkey,
    owner: &Pubkey,
) -> Result<Signature, HarnessError> {
    let lamports = session.rent_exempt(TokenAccount::LEN).await?;
    let create = system_instruction::create_account(
        &session.payer().pubkey(),
        &account.pubkey(),
        lamports,
        TokenAccount::LEN as u64,
        &TOKEN_PROGRAM_ID,
    );
    let initialize =
        token_instruction::initialize_account(&TOKEN_PROGRAM_ID, &account.pubkey(), mint, owner)
            .map_err(|e| HarnessError::Instruction(e.to_string()))?;

    session
        .submit("create token account", &[create, initialize], &[account])
        .await
}
