//! Ledger-backed verification.
//!
//! Each verifier fetches the accounts an operation touched, decodes them and
//! runs the matching checks from [`wpokt_bridge_sdk::verify`]. A missing
//! account fails with [`HarnessError::AccountNotFound`], a mismatching field
//! with [`HarnessError::Verify`].

use solana_sdk::pubkey::Pubkey;
use tracing::debug;
use wpokt_bridge_sdk::instructions::{
    derive_authorization_address, derive_bridge_address, derive_nonce_address,
    derive_wpokt_address, BridgePdas, ClaimPdas, WPOKT_TOKEN_INDEX,
};
use wpokt_bridge_sdk::verify::{self, ExpectedBridge};
use wpokt_bridge_sdk::{
    unpack_token_record, AuthorizationState, BridgeState, ClaimedMarker, DailyTokenClaims,
    MintAccount, NonceEntry, SdkError, TokenAccount, TokenAddedMarker, TokenListEntry,
    VerifyError, WpoktState,
};

use crate::error::HarnessError;
use crate::ledger::Ledger;
use crate::session::Session;

/// Fetches the bridge state.
///
/// # Errors
///
/// Returns an error if the account is missing, foreign or malformed.
pub async fn fetch_bridge_state<L: Ledger>(
    session: &Session<L>,
) -> Result<BridgeState, HarnessError> {
    let program_id = session.bridge_program_id()?;
    let (bridge, _) = derive_bridge_address(&program_id)?;
    session.fetch_owned(&bridge, &program_id).await
}

/// Checks the bridge after construction: global state, plus the WPOKT entry
/// at index 1 registered with no fee, unpaused, and marked as added.
///
/// # Errors
///
/// Returns the first missing account or mismatching field.
pub async fn verify_construction<L: Ledger>(
    session: &Session<L>,
    expected: &ExpectedBridge,
    wpokt_mint: &Pubkey,
) -> Result<(), HarnessError> {
    let program_id = session.bridge_program_id()?;
    let pdas = BridgePdas::derive(&program_id, WPOKT_TOKEN_INDEX, wpokt_mint)?;

    let state: BridgeState = session.fetch_owned(&pdas.bridge, &program_id).await?;
    verify::check_construction(&state, expected)?;
    verify::check_transfer_index(&state, 1)?;

    verify_token_added(session, wpokt_mint, WPOKT_TOKEN_INDEX, 0).await?;
    debug!("bridge at {} constructed", pdas.bridge);
    Ok(())
}

/// Checks balances and the bridge transfer counter after a transfer request.
///
/// # Errors
///
/// Returns the first missing account or mismatching field.
pub async fn verify_transfer_request<L: Ledger>(
    session: &Session<L>,
    source_token_account: &Pubkey,
    source_balance: u64,
    bridge_token_account: &Pubkey,
    bridge_balance: u64,
    current_index: u64,
) -> Result<(), HarnessError> {
    let state = fetch_bridge_state(session).await?;
    verify::check_transfer_index(&state, current_index)?;

    verify_balance(session, source_token_account, source_balance).await?;
    verify_balance(session, bridge_token_account, bridge_balance).await
}

/// Checks the claimed marker, the daily claims counter and the receiver
/// balance after a transfer receipt.
///
/// # Errors
///
/// Returns the first missing account or mismatching field.
pub async fn verify_transfer_receipt<L: Ledger>(
    session: &Session<L>,
    token_index: u64,
    chain_id: u64,
    index: u64,
    destination_token_account: &Pubkey,
    amount: u64,
) -> Result<(), HarnessError> {
    let program_id = session.bridge_program_id()?;
    let pdas = ClaimPdas::derive(&program_id, token_index, chain_id, index)?;

    let claimed: ClaimedMarker = session.fetch_owned(&pdas.claimed, &program_id).await?;
    verify::check_claimed(&claimed, true)?;

    let claims: DailyTokenClaims = session
        .fetch_owned(&pdas.daily_token_claims, &program_id)
        .await?;
    verify::check_daily_claims(&claims, amount)?;

    verify_balance(session, destination_token_account, amount).await
}

/// Checks that `mint` is registered at `token_index` with `fee` and is
/// unpaused.
///
/// # Errors
///
/// Returns the first missing account or mismatching field.
pub async fn verify_token_added<L: Ledger>(
    session: &Session<L>,
    mint: &Pubkey,
    token_index: u64,
    fee: u64,
) -> Result<(), HarnessError> {
    let program_id = session.bridge_program_id()?;
    let pdas = BridgePdas::derive(&program_id, token_index, mint)?;

    let entry: TokenListEntry = session.fetch_owned(&pdas.token_list, &program_id).await?;
    verify::check_token_entry(&entry, mint, fee, false)?;

    let marker: TokenAddedMarker = session.fetch_owned(&pdas.token_added, &program_id).await?;
    verify::check_token_added(&marker, true)?;
    Ok(())
}

/// Checks the WPOKT global state of `mint`.
///
/// # Errors
///
/// Returns the first missing account or mismatching field.
pub async fn verify_wpokt_state<L: Ledger>(
    session: &Session<L>,
    mint: &Pubkey,
    minter: &Pubkey,
) -> Result<(), HarnessError> {
    let program_id = session.wpokt_program_id()?;
    let (wpokt, _) = derive_wpokt_address(&program_id, mint)?;

    let state: WpoktState = session.fetch_owned(&wpokt, &program_id).await?;
    verify::check_wpokt_state(&state, true, minter, mint)?;
    Ok(())
}

/// Checks an initialized mint: authority, decimals and supply.
///
/// # Errors
///
/// Returns the first missing account or mismatching field.
pub async fn verify_mint<L: Ledger>(
    session: &Session<L>,
    mint: &Pubkey,
    authority: &Pubkey,
    decimals: u8,
    supply: u64,
) -> Result<(), HarnessError> {
    let account: MintAccount = session.fetch_token(mint).await?;
    verify::check_mint(&account, true, Some(authority), decimals)?;
    verify::check_supply(&account, supply)?;
    Ok(())
}

async fn fetch_token_account<L: Ledger>(
    session: &Session<L>,
    address: &Pubkey,
) -> Result<TokenAccount, HarnessError> {
    session.fetch_token(address).await
}

async fn verify_balance<L: Ledger>(
    session: &Session<L>,
    address: &Pubkey,
    amount: u64,
) -> Result<(), HarnessError> {
    let account = fetch_token_account(session, address).await?;
    verify::check_balance(&account, amount)?;
    Ok(())
}

/// Checks the mint, owner and balance of a token account.
///
/// # Errors
///
/// Returns the first missing account or mismatching field.
pub async fn verify_token_balance<L: Ledger>(
    session: &Session<L>,
    token_account: &Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
    amount: u64,
) -> Result<(), HarnessError> {
    let account = fetch_token_account(session, token_account).await?;
    verify::check_token_account(&account, mint, owner)?;
    verify::check_balance(&account, amount)?;
    Ok(())
}

/// Checks the permit nonce counter of `owner`.
///
/// # Errors
///
/// Returns the first missing account or mismatching field.
pub async fn verify_nonce_entry<L: Ledger>(
    session: &Session<L>,
    mint: &Pubkey,
    owner: &Pubkey,
    nonce: u64,
) -> Result<(), HarnessError> {
    let program_id = session.wpokt_program_id()?;
    let (address, _) = derive_nonce_address(&program_id, owner, mint)?;

    let entry: NonceEntry = session.fetch_owned(&address, &program_id).await?;
    verify::check_nonce_entry(&entry, owner, nonce)?;
    Ok(())
}

/// Checks the authorization state of (`from`, `nonce`).
///
/// # Errors
///
/// Returns the first missing account or mismatching field.
pub async fn verify_authorization_state<L: Ledger>(
    session: &Session<L>,
    mint: &Pubkey,
    from: &Pubkey,
    nonce: &[u8; 32],
    authorization: bool,
) -> Result<(), HarnessError> {
    let program_id = session.wpokt_program_id()?;
    let (address, _) = derive_authorization_address(&program_id, from, nonce, mint)?;

    let state: AuthorizationState = session.fetch_owned(&address, &program_id).await?;
    verify::check_authorization_state(&state, from, nonce, authorization)?;
    Ok(())
}

/// Expected outcome of a permit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedPermit {
    /// WPOKT mint.
    pub mint: Pubkey,
    /// Owner of the source token account.
    pub owner: Pubkey,
    /// Nonce entry the permit used.
    pub nonce_account: Pubkey,
    /// Nonce counter after the permit.
    pub nonce: u64,
    /// Token account that granted the allowance.
    pub source_token_account: Pubkey,
    /// Token account holding the allowance.
    pub delegate_token_account: Pubkey,
    /// Allowance.
    pub value: u64,
}

/// Checks the nonce entry and the delegation left by a permit.
///
/// # Errors
///
/// Returns [`SdkError::AddressMismatch`] if the nonce account is not the one
/// derived for the owner, otherwise the first missing account or mismatching
/// field.
pub async fn verify_permit<L: Ledger>(
    session: &Session<L>,
    expected: &ExpectedPermit,
) -> Result<(), HarnessError> {
    let program_id = session.wpokt_program_id()?;
    let (derived, _) = derive_nonce_address(&program_id, &expected.owner, &expected.mint)?;
    if derived != expected.nonce_account {
        return Err(SdkError::AddressMismatch {
            account: "nonce_account",
            expected: derived.to_string(),
            actual: expected.nonce_account.to_string(),
        }
        .into());
    }

    verify_nonce_entry(session, &expected.mint, &expected.owner, expected.nonce).await?;

    let source = fetch_token_account(session, &expected.source_token_account).await?;
    verify::check_delegation(&source, &expected.delegate_token_account, expected.value)?;
    Ok(())
}

/// Checks the accounts prepared before WPOKT construction: the state PDA
/// must not exist yet and the mint must be allocated but uninitialized.
///
/// # Errors
///
/// Returns [`VerifyError::Initialization`] if either account is already in
/// use, or [`HarnessError::AccountNotFound`] if the mint is missing.
pub async fn verify_accounts_uninitialized<L: Ledger>(
    session: &Session<L>,
    mint: &Pubkey,
) -> Result<(), HarnessError> {
    let program_id = session.wpokt_program_id()?;
    let (wpokt, _) = derive_wpokt_address(&program_id, mint)?;

    if session.ledger().get_account(&wpokt).await?.is_some() {
        return Err(VerifyError::Initialization {
            expected: format!("no account at {wpokt}"),
            observed: "account exists".to_string(),
        }
        .into());
    }

    let account = session.fetch_account(mint).await?;
    if account.data.is_empty() {
        return Err(HarnessError::AccountNotFound(*mint));
    }
    let decoded: MintAccount = unpack_token_record(&account.data)?;
    verify::check_mint(&decoded, false, None, 0)?;
    Ok(())
}
