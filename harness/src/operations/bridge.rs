//! Bridge program operations.

use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use wpokt_bridge_sdk::instructions::{
    admin, dictionaries, fees, AddTokenBuilder, ConstructBuilder, TransferReceiptBuilder,
    TransferRequestBuilder, WithdrawFeesBuilder,
};

use crate::error::HarnessError;
use crate::ledger::Ledger;
use crate::session::Session;

/// Outbound transfer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRequestParams {
    /// Token index.
    pub token_index: u64,
    /// Token mint.
    pub mint: Pubkey,
    /// Token account the amount is taken from.
    pub source_token_account: Pubkey,
    /// Scratch account receiving the computed fee.
    pub fee_result_account: Pubkey,
    /// Recipient on the destination chain.
    pub to: Pubkey,
    /// Amount in base units.
    pub amount: u64,
    /// Destination chain id.
    pub chain_id: u64,
}

/// Inbound transfer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferReceiptParams {
    /// Token index.
    pub token_index: u64,
    /// Token mint.
    pub mint: Pubkey,
    /// Sender on the source chain.
    pub from: Pubkey,
    /// Bridge token account releasing the amount.
    pub source_token_account: Pubkey,
    /// Token account of the receiver.
    pub destination_token_account: Pubkey,
    /// Amount in base units.
    pub amount: u64,
    /// Source chain id.
    pub chain_id: u64,
    /// Transfer index on the source chain.
    pub index: u64,
}

/// Constructs the bridge with the configured chain id and stable fee.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn construct<L: Ledger>(
    session: &Session<L>,
    owner: &Keypair,
    wpokt_mint: &Pubkey,
    verify_address: &Pubkey,
) -> Result<Signature, HarnessError> {
    let ix = ConstructBuilder::new(session.bridge_program_id()?)
        .owner(owner.pubkey())
        .wpokt_mint(*wpokt_mint)
        .verify_address(*verify_address)
        .chain_id(session.config().chain_id)
        .stable_fee(session.config().stable_fee)
        .build()?;
    session.submit("bridge construct", &[ix], &[owner]).await
}

/// Locks tokens for a transfer to another chain.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn transfer_request<L: Ledger>(
    session: &Session<L>,
    source_authority: &Keypair,
    params: &TransferRequestParams,
) -> Result<Signature, HarnessError> {
    let ix = TransferRequestBuilder::new(session.bridge_program_id()?)
        .source_authority(source_authority.pubkey())
        .source_token_account(params.source_token_account)
        .mint(params.mint)
        .fee_result_account(params.fee_result_account)
        .to(params.to)
        .token_index(params.token_index)
        .amount(params.amount)
        .chain_id(params.chain_id)
        .build()?;
    session
        .submit("transfer request", &[ix], &[source_authority])
        .await
}

/// Releases tokens for a transfer from another chain.
///
/// `verifier` must be the bridge's verify address.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn transfer_receipt<L: Ledger>(
    session: &Session<L>,
    receiver: &Keypair,
    verifier: &Keypair,
    params: &TransferReceiptParams,
) -> Result<Signature, HarnessError> {
    let ix = TransferReceiptBuilder::new(session.bridge_program_id()?)
        .receiver(receiver.pubkey())
        .from(params.from)
        .signature_account(verifier.pubkey())
        .source_token_account(params.source_token_account)
        .destination_token_account(params.destination_token_account)
        .mint(params.mint)
        .token_index(params.token_index)
        .amount(params.amount)
        .chain_id(params.chain_id)
        .index(params.index)
        .build()?;
    session
        .submit("transfer receipt", &[ix], &[receiver, verifier])
        .await
}

/// Allocates the claimed marker of (`chain_id`, `index`).
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn create_claimed_marker<L: Ledger>(
    session: &Session<L>,
    index: u64,
    chain_id: u64,
) -> Result<Signature, HarnessError> {
    let ix = dictionaries::create_claimed_marker(
        &session.bridge_program_id()?,
        &session.payer().pubkey(),
        index,
        chain_id,
    )?;
    session.submit("create claimed marker", &[ix], &[]).await
}

/// Allocates the daily claims counter of a token.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn create_daily_token_claims<L: Ledger>(
    session: &Session<L>,
    token_index: u64,
) -> Result<Signature, HarnessError> {
    let ix = dictionaries::create_daily_token_claims(
        &session.bridge_program_id()?,
        &session.payer().pubkey(),
        token_index,
    )?;
    session
        .submit("create daily token claims", &[ix], &[])
        .await
}

/// Registers `mint` at `token_index`.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn add_token<L: Ledger>(
    session: &Session<L>,
    owner: &Keypair,
    mint: &Pubkey,
    token_index: u64,
    fee: u64,
    limit: u64,
) -> Result<Signature, HarnessError> {
    let ix = AddTokenBuilder::new(session.bridge_program_id()?)
        .owner(owner.pubkey())
        .mint(*mint)
        .token_index(token_index)
        .fee(fee)
        .limit(limit)
        .build()?;
    session.submit("add token", &[ix], &[owner]).await
}

/// Replaces the attestation signer.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn update_verify_address<L: Ledger>(
    session: &Session<L>,
    owner: &Keypair,
    verify_address: &Pubkey,
) -> Result<Signature, HarnessError> {
    let ix = admin::update_verify_address(
        &session.bridge_program_id()?,
        &owner.pubkey(),
        verify_address,
    )?;
    session
        .submit("update verify address", &[ix], &[owner])
        .await
}

/// Sets the daily limit of a token.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn update_token_limit<L: Ledger>(
    session: &Session<L>,
    owner: &Keypair,
    token_index: u64,
    limit: u64,
) -> Result<Signature, HarnessError> {
    let ix = admin::update_token_limit(
        &session.bridge_program_id()?,
        &owner.pubkey(),
        token_index,
        limit,
    )?;
    session.submit("update token limit", &[ix], &[owner]).await
}

/// Sets the start of the limit window of a token.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn set_token_limit_time<L: Ledger>(
    session: &Session<L>,
    owner: &Keypair,
    token_index: u64,
    timestamp: u64,
) -> Result<Signature, HarnessError> {
    let ix = admin::set_token_limit_time(
        &session.bridge_program_id()?,
        &owner.pubkey(),
        token_index,
        timestamp,
    )?;
    session
        .submit("set token limit time", &[ix], &[owner])
        .await
}

/// Schedules a new stable fee.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn update_stable_fee<L: Ledger>(
    session: &Session<L>,
    owner: &Keypair,
    new_stable_fee: u64,
) -> Result<Signature, HarnessError> {
    let ix = admin::update_stable_fee(
        &session.bridge_program_id()?,
        &owner.pubkey(),
        new_stable_fee,
    )?;
    session.submit("update stable fee", &[ix], &[owner]).await
}

/// Schedules a new fee for a token.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn update_token_fee<L: Ledger>(
    session: &Session<L>,
    owner: &Keypair,
    token_index: u64,
    new_token_fee: u64,
) -> Result<Signature, HarnessError> {
    let ix = admin::update_token_fee(
        &session.bridge_program_id()?,
        &owner.pubkey(),
        token_index,
        new_token_fee,
    )?;
    session.submit("update token fee", &[ix], &[owner]).await
}

/// Applies scheduled fees of a token. Anyone may call it.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn update_fees<L: Ledger>(
    session: &Session<L>,
    token_index: u64,
) -> Result<Signature, HarnessError> {
    let ix = fees::update_fees(&session.bridge_program_id()?, token_index)?;
    session.submit("update fees", &[ix], &[]).await
}

/// Writes the fee of `amount` into `result_account`.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn calculate_fee<L: Ledger>(
    session: &Session<L>,
    token_index: u64,
    amount: u64,
    result_account: &Pubkey,
) -> Result<Signature, HarnessError> {
    let ix = fees::calculate_fee(
        &session.bridge_program_id()?,
        token_index,
        amount,
        result_account,
    )?;
    session.submit("calculate fee", &[ix], &[]).await
}

/// Withdraws collected fees of a token to `owner_token_account`.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn withdraw_fees<L: Ledger>(
    session: &Session<L>,
    owner: &Keypair,
    owner_token_account: &Pubkey,
    mint: &Pubkey,
    token_index: u64,
) -> Result<Signature, HarnessError> {
    let ix = WithdrawFeesBuilder::new(session.bridge_program_id()?)
        .owner(owner.pubkey())
        .owner_token_account(*owner_token_account)
        .mint(*mint)
        .token_index(token_index)
        .build()?;
    session.submit("withdraw fees", &[ix], &[owner]).await
}

/// Pauses a token.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn pause_token<L: Ledger>(
    session: &Session<L>,
    owner: &Keypair,
    token_index: u64,
) -> Result<Signature, HarnessError> {
    let ix = admin::pause_token(&session.bridge_program_id()?, &owner.pubkey(), token_index)?;
    session.submit("pause token", &[ix], &[owner]).await
}

/// Unpauses a token.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn unpause_token<L: Ledger>(
    session: &Session<L>,
    owner: &Keypair,
    token_index: u64,
) -> Result<Signature, HarnessError> {
    let ix = admin::unpause_token(&session.bridge_program_id()?, &owner.pubkey(), token_index)?;
    session.submit("unpause token", &[ix], &[owner]).await
}

/// Drops ownership of the bridge.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn renounce_ownership<L: Ledger>(
    session: &Session<L>,
    owner: &Keypair,
) -> Result<Signature, HarnessError> {
    let ix = admin::renounce_ownership(&session.bridge_program_id()?, &owner.pubkey())?;
    session.submit("renounce ownership", &[ix], &[owner]).await
}

/// Hands ownership of the bridge to `new_owner`.
///
/// # Errors
///
/// Returns an error if the program id is missing or the transaction fails.
pub async fn transfer_ownership<L: Ledger>(
    session: &Session<L>,
    owner: &Keypair,
    new_owner: &Pubkey,
) -> Result<Signature, HarnessError> {
    let ix = admin::transfer_ownership(&session.bridge_program_id()?, &owner.pubkey(), new_owner)?;
    session.submit("transfer ownership", &[ix], &[owner]).await
}
