//! End-to-end scenarios.
//!
//! [`check_derivation`] runs offline. [`run_wpokt`] and [`run_bridge`]
//! drive a live ledger through the program flows, verifying the state after
//! every step. Both check that their programs are deployed first. Any
//! failure aborts the scenario.

use chrono::{Duration, Utc};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use tracing::info;
use wpokt_bridge_sdk::instructions::{
    derive_address, derive_bridge_address, derive_nonce_address, derive_token_list_address,
    derive_wpokt_address, pda, BridgePdas, WPOKT_TOKEN_INDEX,
};
use wpokt_bridge_sdk::verify::ExpectedBridge;
use wpokt_bridge_sdk::{AccountLayout, BridgeInstruction, ClaimedMarker};

use crate::error::HarnessError;
use crate::ledger::Ledger;
use crate::operations::accounts;
use crate::operations::bridge::{self, TransferReceiptParams, TransferRequestParams};
use crate::operations::wpokt::{self, PermitParams};
use crate::programs;
use crate::session::Session;
use crate::verify::{self, ExpectedPermit};

/// Tokens minted to the receiver in the WPOKT scenario.
pub const WPOKT_MINT_AMOUNT: u64 = 100;

/// Allowance granted by the permit step.
pub const PERMIT_VALUE: u64 = 40;

/// Tokens minted to the sender in the bridge scenario.
pub const BRIDGE_MINT_AMOUNT: u64 = 100;

/// Outcome of [`run_wpokt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WpoktRun {
    /// Mint created for the run.
    pub mint: Pubkey,
    /// WPOKT state of the mint.
    pub wpokt: Pubkey,
    /// Token account the tokens were minted to.
    pub receiver_token_account: Pubkey,
    /// Minter after the hand-over.
    pub minter: Pubkey,
}

/// Outcome of [`run_bridge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeRun {
    /// Bridge state.
    pub bridge: Pubkey,
    /// WPOKT mint registered at index 1.
    pub mint: Pubkey,
    /// Token account holding locked tokens.
    pub bridge_token_account: Pubkey,
    /// Token account credited by the receipt.
    pub receiver_token_account: Pubkey,
}

fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<(), HarnessError> {
    if condition {
        Ok(())
    } else {
        Err(HarnessError::Scenario(message()))
    }
}

/// Checks derivation and codec properties without touching the ledger.
///
/// # Errors
///
/// Returns [`HarnessError::Scenario`] naming the first property that fails.
pub fn check_derivation(program_id: &Pubkey) -> Result<(), HarnessError> {
    let first = derive_bridge_address(program_id)?;
    let second = derive_bridge_address(program_id)?;
    ensure(first == second, || {
        format!("bridge address not stable: {:?} vs {:?}", first, second)
    })?;

    let (fixed, _) = derive_token_list_address(program_id, 7)?;
    let (narrow, _) = derive_address(
        &[&[7u8], pda::BRIDGE_SEED, pda::TOKEN_LIST_DICTIONARY_SEED],
        program_id,
    )?;
    ensure(fixed != narrow, || {
        format!("one-byte index seed collides with the 8-byte seed at {}", fixed)
    })?;

    let request = BridgeInstruction::TransferRequest {
        token_index: 7,
        to: Pubkey::new_unique(),
        amount: 500,
        chain_id: 3,
    };
    let data = request.encode()?;
    ensure(data.len() == 57, || {
        format!("transfer request encoded to {} bytes", data.len())
    })?;
    let decoded = BridgeInstruction::decode(&data)?;
    ensure(decoded == request, || {
        format!("transfer request decoded to {:?}", decoded)
    })?;

    let marker = ClaimedMarker::unpack(&[0x01])?;
    ensure(marker.claimed, || "claimed blob 0x01 decoded as unclaimed".to_string())?;

    info!("derivation checks passed for {}", program_id);
    Ok(())
}

/// Creates a mint through the WPOKT program with the payer as minter.
async fn construct_wpokt<L: Ledger>(
    session: &Session<L>,
    mint: &Keypair,
) -> Result<Pubkey, HarnessError> {
    accounts::create_mint_account(session, mint).await?;
    verify::verify_accounts_uninitialized(session, &mint.pubkey()).await?;

    wpokt::construct(session, &mint.pubkey(), &session.payer().pubkey()).await?;
    let (state, _) = derive_wpokt_address(&session.wpokt_program_id()?, &mint.pubkey())?;
    verify::verify_wpokt_state(session, &mint.pubkey(), &session.payer().pubkey()).await?;
    verify::verify_mint(session, &mint.pubkey(), &state, 0, 0).await?;
    Ok(state)
}

/// Runs the WPOKT flow: construct, mint, permit, authorization state and
/// minter hand-over.
///
/// # Errors
///
/// Returns [`HarnessError::ProgramNotDeployed`] or
/// [`HarnessError::ProgramNotExecutable`] before submitting anything, then
/// the first failing submission or verification.
pub async fn run_wpokt<L: Ledger>(session: &Session<L>) -> Result<WpoktRun, HarnessError> {
    programs::ensure_deployed(session.ledger(), &session.wpokt_program_id()?).await?;
    let payer = session.payer();
    let mint_keypair = Keypair::new();
    let mint = mint_keypair.pubkey();
    info!("wpokt scenario with mint {}", mint);

    let wpokt_state = construct_wpokt(session, &mint_keypair).await?;
    info!("wpokt constructed at {}", wpokt_state);

    let receiver = Keypair::new();
    accounts::create_token_account(session, &receiver, &mint, &payer.pubkey()).await?;
    wpokt::mint(session, payer, &mint, &receiver.pubkey(), WPOKT_MINT_AMOUNT).await?;
    verify::verify_token_balance(
        session,
        &receiver.pubkey(),
        &mint,
        &payer.pubkey(),
        WPOKT_MINT_AMOUNT,
    )
    .await?;
    verify::verify_mint(session, &mint, &wpokt_state, 0, WPOKT_MINT_AMOUNT).await?;
    info!("minted {} to {}", WPOKT_MINT_AMOUNT, receiver.pubkey());

    let delegate = Keypair::new();
    let delegate_owner = Keypair::new();
    accounts::create_token_account(session, &delegate, &mint, &delegate_owner.pubkey()).await?;
    wpokt::initialize_nonce_account(session, payer, &mint).await?;
    verify::verify_nonce_entry(session, &mint, &payer.pubkey(), 0).await?;

    let (nonce_account, _) =
        derive_nonce_address(&session.wpokt_program_id()?, &payer.pubkey(), &mint)?;
    // permit deadline one minute in the past
    let deadline = wpokt::deadline_at(Utc::now(), Duration::minutes(-1));
    let permit = PermitParams {
        mint,
        source_token_account: receiver.pubkey(),
        delegate_token_account: delegate.pubkey(),
        nonce_account,
        value: PERMIT_VALUE,
        deadline,
    };
    wpokt::permit(session, payer, &permit).await?;
    verify::verify_permit(
        session,
        &ExpectedPermit {
            mint,
            owner: payer.pubkey(),
            nonce_account,
            nonce: 1,
            source_token_account: receiver.pubkey(),
            delegate_token_account: delegate.pubkey(),
            value: PERMIT_VALUE,
        },
    )
    .await?;
    info!("permit of {} to {} verified", PERMIT_VALUE, delegate.pubkey());

    let authorization_nonce = Keypair::new().pubkey().to_bytes();
    wpokt::initialize_authorization_state(session, payer, &authorization_nonce, &mint).await?;
    verify::verify_authorization_state(
        session,
        &mint,
        &payer.pubkey(),
        &authorization_nonce,
        false,
    )
    .await?;

    let new_minter = Keypair::new();
    wpokt::change_minter(session, payer, &mint, &new_minter.pubkey()).await?;
    verify::verify_wpokt_state(session, &mint, &new_minter.pubkey()).await?;
    verify::verify_mint(session, &mint, &new_minter.pubkey(), 0, WPOKT_MINT_AMOUNT).await?;
    info!("minter handed over to {}", new_minter.pubkey());

    Ok(WpoktRun {
        mint,
        wpokt: wpokt_state,
        receiver_token_account: receiver.pubkey(),
        minter: new_minter.pubkey(),
    })
}

/// Runs the bridge flow: construct with a fresh WPOKT mint, lock half of the
/// sender's tokens for another chain, then claim an inbound transfer of the
/// other half.
///
/// The payer acts as owner, verify address and sender. The bridge state is a
/// singleton, so the flow runs once per bridge deployment.
///
/// # Errors
///
/// Returns a program deployment error before submitting anything, then the
/// first failing submission or verification.
pub async fn run_bridge<L: Ledger>(session: &Session<L>) -> Result<BridgeRun, HarnessError> {
    let payer = session.payer();
    let config = session.config();
    let program_id = session.bridge_program_id()?;
    programs::ensure_deployed(session.ledger(), &program_id).await?;
    programs::ensure_deployed(session.ledger(), &session.wpokt_program_id()?).await?;
    let remote_chain_id = config.chain_id.checked_add(1).ok_or_else(|| {
        HarnessError::Scenario(format!("chain id {} has no successor", config.chain_id))
    })?;

    let mint_keypair = Keypair::new();
    let mint = mint_keypair.pubkey();
    construct_wpokt(session, &mint_keypair).await?;
    let pdas = BridgePdas::derive(&program_id, WPOKT_TOKEN_INDEX, &mint)?;
    info!("bridge scenario with mint {} at {}", mint, pdas.bridge);

    bridge::construct(session, payer, &mint, &payer.pubkey()).await?;
    let expected = ExpectedBridge {
        owner: payer.pubkey(),
        verify_address: payer.pubkey(),
        chain_id: config.chain_id,
        stable_fee: config.stable_fee,
    };
    verify::verify_construction(session, &expected, &mint).await?;

    let source = Keypair::new();
    accounts::create_token_account(session, &source, &mint, &payer.pubkey()).await?;
    wpokt::mint(session, payer, &mint, &source.pubkey(), BRIDGE_MINT_AMOUNT).await?;

    let fee_result = Keypair::new();
    accounts::create_fee_result_account(session, &fee_result).await?;

    let locked = BRIDGE_MINT_AMOUNT / 2;
    let request = TransferRequestParams {
        token_index: WPOKT_TOKEN_INDEX,
        mint,
        source_token_account: source.pubkey(),
        fee_result_account: fee_result.pubkey(),
        to: payer.pubkey(),
        amount: locked,
        chain_id: remote_chain_id,
    };
    bridge::transfer_request(session, payer, &request).await?;
    verify::verify_transfer_request(
        session,
        &source.pubkey(),
        BRIDGE_MINT_AMOUNT - locked,
        &pdas.bridge_token_account,
        locked,
        2,
    )
    .await?;
    info!("locked {} for chain {}", locked, remote_chain_id);

    let transfer_index = 1;
    bridge::create_daily_token_claims(session, request.token_index).await?;
    bridge::create_claimed_marker(session, transfer_index, remote_chain_id).await?;

    let receiver = Keypair::new();
    let receiver_token = Keypair::new();
    accounts::create_token_account(session, &receiver_token, &mint, &receiver.pubkey()).await?;

    let claimed = BRIDGE_MINT_AMOUNT - locked;
    let receipt = TransferReceiptParams {
        token_index: request.token_index,
        mint,
        from: payer.pubkey(),
        source_token_account: source.pubkey(),
        destination_token_account: receiver_token.pubkey(),
        amount: claimed,
        chain_id: remote_chain_id,
        index: transfer_index,
    };
    bridge::transfer_receipt(session, &receiver, payer, &receipt).await?;
    verify::verify_transfer_receipt(
        session,
        receipt.token_index,
        remote_chain_id,
        transfer_index,
        &receiver_token.pubkey(),
        claimed,
    )
    .await?;
    info!("claimed {} into {}", claimed, receiver_token.pubkey());

    Ok(BridgeRun {
        bridge: pdas.bridge,
        mint,
        bridge_token_account: pdas.bridge_token_account,
        receiver_token_account: receiver_token.pubkey(),
    })
}
