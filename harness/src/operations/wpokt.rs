//! WPOKT program operations.

use chrono::{DateTime, Duration, Utc};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use tracing::debug;
use wpokt_bridge_sdk::instructions::{
    derive_nonce_address, minter, nonces, PermitBuilder, TransferWithAuthorizationBuilder,
};

use crate::error::HarnessError;
use crate::ledger::Ledger;
use crate::session::Session;

/// Token approval signed by the source owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermitParams {
    /// WPOKT mint.
    pub mint: Pubkey,
    /// Token account granting the allowance.
    pub source_token_account: Pubkey,
    /// Token account receiving the allowance.
    pub delegate_token_account: Pubkey,
    /// Nonce entry the caller expects the program to bump.
    pub nonce_account: Pubkey,
    /// Allowance in base units.
    pub value: u64,
    /// Unix timestamp checked against the ledger clock.
    pub deadline: u64,
}

/// Transfer signed off-ledger by the source owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizedTransferParams {
    /// WPOKT mint.
    pub mint: Pubkey,
    /// Token account debited.
    pub source_token_account: Pubkey,
    /// Token account credited.
    pub destination_token_account: Pubkey,
    /// Amount in base units.
    pub value: u64,
    /// Earliest unix timestamp the transfer is valid at.
    pub valid_after: u64,
    /// Unix timestamp the transfer expires at.
    pub valid_before: u64,
    /// One-time authorization nonce.
    pub nonce: [u8; 32],
}

/// Unix timestamp `offset` away from `now`, clamped at zero.
#[must_use]
pub fn deadline_at(now: DateTime<Utc>, offset: Duration) -> u64 {
    u64::try_from((now + offset).timestamp()).unwrap_or(0)
}

/// Constructs the WPOKT state for an allocated mint and makes
/// `initial_minter` its minter.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn construct<L: Ledger>(
    session: &Session<L>,
    mint: &Pubkey,
    initial_minter: &Pubkey,
) -> Result<Signature, HarnessError> {
    let ix = minter::construct(
        &session.wpokt_program_id()?,
        &session.payer().pubkey(),
        mint,
        initial_minter,
    )?;
    session.submit("wpokt construct", &[ix], &[]).await
}

/// Mints `value` tokens into `receiver_token_account`.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn mint<L: Ledger>(
    session: &Session<L>,
    minter: &Keypair,
    mint: &Pubkey,
    receiver_token_account: &Pubkey,
    value: u64,
) -> Result<Signature, HarnessError> {
    let ix = minter::mint_to(
        &session.wpokt_program_id()?,
        &minter.pubkey(),
        mint,
        receiver_token_account,
        value,
    )?;
    session.submit("wpokt mint", &[ix], &[minter]).await
}

/// Hands the minter role and the mint authority to `new_minter`.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn change_minter<L: Ledger>(
    session: &Session<L>,
    current_minter: &Keypair,
    mint: &Pubkey,
    new_minter: &Pubkey,
) -> Result<Signature, HarnessError> {
    let ix = minter::change_minter(
        &session.wpokt_program_id()?,
        &current_minter.pubkey(),
        mint,
        new_minter,
    )?;
    session
        .submit("wpokt change minter", &[ix], &[current_minter])
        .await
}

/// Allocates the permit nonce entry of `owner`.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn initialize_nonce_account<L: Ledger>(
    session: &Session<L>,
    owner: &Keypair,
    mint: &Pubkey,
) -> Result<Signature, HarnessError> {
    let program_id = session.wpokt_program_id()?;
    let (nonce_account, _) = derive_nonce_address(&program_id, &owner.pubkey(), mint)?;
    debug!("nonce entry of {} at {}", owner.pubkey(), nonce_account);

    let ix = nonces::initialize_nonce_account(
        &program_id,
        &session.payer().pubkey(),
        &owner.pubkey(),
        mint,
    )?;
    session
        .submit("wpokt initialize nonce account", &[ix], &[owner])
        .await
}

/// Allocates the authorization state of (`from`, `nonce`).
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn initialize_authorization_state<L: Ledger>(
    session: &Session<L>,
    from: &Keypair,
    nonce: &[u8; 32],
    mint: &Pubkey,
) -> Result<Signature, HarnessError> {
    let ix = nonces::initialize_authorization_state(
        &session.wpokt_program_id()?,
        &session.payer().pubkey(),
        &from.pubkey(),
        nonce,
        mint,
    )?;
    session
        .submit("wpokt initialize authorization state", &[ix], &[from])
        .await
}

/// Approves `params.delegate_token_account` to spend from the owner's
/// source account.
///
/// The supplied nonce account must be the one derived for the owner.
///
/// # Errors
///
/// Returns [`SdkError::AddressMismatch`](wpokt_bridge_sdk::SdkError) before
/// submitting when the nonce account is wrong, otherwise any submission
/// error.
pub async fn permit<L: Ledger>(
    session: &Session<L>,
    owner: &Keypair,
    params: &PermitParams,
) -> Result<Signature, HarnessError> {
    let ix = PermitBuilder::new(session.wpokt_program_id()?)
        .payer(session.payer().pubkey())
        .owner(owner.pubkey())
        .source_token_account(params.source_token_account)
        .delegate_token_account(params.delegate_token_account)
        .mint(params.mint)
        .nonce_account(params.nonce_account)
        .value(params.value)
        .deadline(params.deadline)
        .build()?;
    session.submit("wpokt permit", &[ix], &[owner]).await
}

/// Moves tokens under a one-time authorization of the source owner.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn transfer_with_authorization<L: Ledger>(
    session: &Session<L>,
    from: &Keypair,
    params: &AuthorizedTransferParams,
) -> Result<Signature, HarnessError> {
    let ix = TransferWithAuthorizationBuilder::new(session.wpokt_program_id()?)
        .from(from.pubkey())
        .source_token_account(params.source_token_account)
        .destination_token_account(params.destination_token_account)
        .mint(params.mint)
        .nonce(params.nonce)
        .value(params.value)
        .valid_between(params.valid_after, params.valid_before)
        .build()?;
    session
        .submit("wpokt transfer with authorization", &[ix], &[from])
        .await
}
