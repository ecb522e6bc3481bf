mod helpers;

use helpers::create_fixture;
use solana_sdk::{pubkey::Pubkey, signature::Signer};
use wpokt_bridge_harness::verify::{self, ExpectedPermit};
use wpokt_bridge_harness::HarnessError;
use wpokt_bridge_sdk::instructions::{
    derive_nonce_address, derive_wpokt_address, BridgePdas, ClaimPdas, TOKEN_PROGRAM_ID,
    WPOKT_TOKEN_INDEX,
};
use solana_program_pack::Pack;
use wpokt_bridge_sdk::verify::ExpectedBridge;
use wpokt_bridge_sdk::{
    AccountLayout, BridgeState, ClaimedMarker, DailyTokenClaims, MintAccount, NonceEntry,
    SdkError, TokenAccount, TokenAccountState, TokenAddedMarker, TokenListEntry, VerifyError,
    WpoktState,
};

async fn seed_constructed_bridge(
    fixture: &helpers::Fixture,
    owner: Pubkey,
    verify_address: Pubkey,
    mint: Pubkey,
) {
    let pdas = BridgePdas::derive(&fixture.bridge_program_id, WPOKT_TOKEN_INDEX, &mint)
        .expect("derive");
    let program_id = fixture.bridge_program_id;

    let state = BridgeState {
        is_initialized: true,
        owner,
        fee_update_duration: 1,
        verify_address,
        current_index: 1,
        chain_id: 1,
        stable_fee: 10,
        ..BridgeState::default()
    };
    fixture.ledger.put_record(pdas.bridge, program_id, &state).await;

    let entry = TokenListEntry {
        is_initialized: true,
        token_address: mint,
        exists: true,
        ..TokenListEntry::default()
    };
    fixture
        .ledger
        .put_record(pdas.token_list, program_id, &entry)
        .await;
    fixture
        .ledger
        .put_record(
            pdas.token_added,
            program_id,
            &TokenAddedMarker { token_added: true },
        )
        .await;
}

fn token_account(mint: Pubkey, owner: Pubkey, amount: u64) -> TokenAccount {
    TokenAccount {
        mint,
        owner,
        amount,
        state: TokenAccountState::Initialized,
        ..TokenAccount::default()
    }
}

#[tokio::test]
async fn test_verify_construction_passes() {
    let fixture = create_fixture();
    let owner = Pubkey::new_unique();
    let verify_address = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    seed_constructed_bridge(&fixture, owner, verify_address, mint).await;

    let expected = ExpectedBridge {
        owner,
        verify_address,
        chain_id: 1,
        stable_fee: 10,
    };
    verify::verify_construction(&fixture.session, &expected, &mint)
        .await
        .expect("verify");
}

#[tokio::test]
async fn test_verify_construction_reports_wrong_owner() {
    let fixture = create_fixture();
    let verify_address = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    seed_constructed_bridge(&fixture, Pubkey::new_unique(), verify_address, mint).await;

    let expected = ExpectedBridge {
        owner: Pubkey::new_unique(),
        verify_address,
        chain_id: 1,
        stable_fee: 10,
    };
    let result = verify::verify_construction(&fixture.session, &expected, &mint).await;

    assert!(matches!(
        result,
        Err(HarnessError::Verify(VerifyError::Owner { .. }))
    ));
}

#[tokio::test]
async fn test_verify_construction_rejects_foreign_state() {
    let fixture = create_fixture();
    let mint = Pubkey::new_unique();
    let pdas = BridgePdas::derive(&fixture.bridge_program_id, WPOKT_TOKEN_INDEX, &mint)
        .expect("derive");
    fixture
        .ledger
        .put_record(pdas.bridge, Pubkey::new_unique(), &BridgeState::default())
        .await;

    let expected = ExpectedBridge {
        owner: Pubkey::new_unique(),
        verify_address: Pubkey::new_unique(),
        chain_id: 1,
        stable_fee: 10,
    };
    let result = verify::verify_construction(&fixture.session, &expected, &mint).await;

    assert!(matches!(result, Err(HarnessError::UnexpectedOwner { .. })));
}

#[tokio::test]
async fn test_verify_transfer_request_balances() {
    let fixture = create_fixture();
    let owner = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    seed_constructed_bridge(&fixture, owner, owner, mint).await;

    let pdas = BridgePdas::derive(&fixture.bridge_program_id, WPOKT_TOKEN_INDEX, &mint)
        .expect("derive");
    let mut state = BridgeState::unpack(
        &fixture
            .session
            .fetch_account(&pdas.bridge)
            .await
            .expect("fetch")
            .data,
    )
    .expect("unpack");
    state.current_index = 2;
    fixture
        .ledger
        .put_record(pdas.bridge, fixture.bridge_program_id, &state)
        .await;

    let source = Pubkey::new_unique();
    fixture
        .ledger
        .put_packed(source, token_account(mint, owner, 50))
        .await;
    fixture
        .ledger
        .put_packed(
            pdas.bridge_token_account,
            token_account(mint, pdas.bridge, 50),
        )
        .await;

    verify::verify_transfer_request(
        &fixture.session,
        &source,
        50,
        &pdas.bridge_token_account,
        50,
        2,
    )
    .await
    .expect("verify");

    let result = verify::verify_transfer_request(
        &fixture.session,
        &source,
        100,
        &pdas.bridge_token_account,
        50,
        2,
    )
    .await;
    assert!(matches!(
        result,
        Err(HarnessError::Verify(VerifyError::Balance { .. }))
    ));
}

#[tokio::test]
async fn test_verify_transfer_receipt() {
    let fixture = create_fixture();
    let program_id = fixture.bridge_program_id;
    let claim = ClaimPdas::derive(&program_id, WPOKT_TOKEN_INDEX, 2, 1).expect("derive");
    let destination = Pubkey::new_unique();

    let missing =
        verify::verify_transfer_receipt(&fixture.session, WPOKT_TOKEN_INDEX, 2, 1, &destination, 50)
            .await;
    assert!(matches!(
        missing,
        Err(HarnessError::AccountNotFound(address)) if address == claim.claimed
    ));

    fixture
        .ledger
        .put_record(claim.claimed, program_id, &ClaimedMarker { claimed: true })
        .await;
    fixture
        .ledger
        .put_record(
            claim.daily_token_claims,
            program_id,
            &DailyTokenClaims {
                daily_token_claims: 50,
            },
        )
        .await;
    fixture
        .ledger
        .put_packed(
            destination,
            token_account(Pubkey::new_unique(), Pubkey::new_unique(), 50),
        )
        .await;

    verify::verify_transfer_receipt(&fixture.session, WPOKT_TOKEN_INDEX, 2, 1, &destination, 50)
        .await
        .expect("verify");
}

#[tokio::test]
async fn test_verify_truncated_account_is_fatal() {
    let fixture = create_fixture();
    let program_id = fixture.bridge_program_id;
    let claim = ClaimPdas::derive(&program_id, WPOKT_TOKEN_INDEX, 2, 1).expect("derive");
    fixture
        .ledger
        .put_account(claim.claimed, program_id, Vec::new())
        .await;

    let result = verify::verify_transfer_receipt(
        &fixture.session,
        WPOKT_TOKEN_INDEX,
        2,
        1,
        &Pubkey::new_unique(),
        50,
    )
    .await;

    assert!(matches!(
        result,
        Err(HarnessError::Sdk(SdkError::LengthMismatch { .. }))
    ));
}

#[tokio::test]
async fn test_verify_wpokt_state_and_mint() {
    let fixture = create_fixture();
    let mint = Pubkey::new_unique();
    let minter = Pubkey::new_unique();
    let (state_address, _) =
        derive_wpokt_address(&fixture.wpokt_program_id, &mint).expect("derive");

    fixture
        .ledger
        .put_record(
            state_address,
            fixture.wpokt_program_id,
            &WpoktState {
                is_initialized: true,
                minter,
                mint,
                ..WpoktState::default()
            },
        )
        .await;
    fixture
        .ledger
        .put_packed(
            mint,
            MintAccount {
                mint_authority: Some(state_address).into(),
                supply: 100,
                decimals: 0,
                is_initialized: true,
                ..MintAccount::default()
            },
        )
        .await;

    verify::verify_wpokt_state(&fixture.session, &mint, &minter)
        .await
        .expect("state");
    verify::verify_mint(&fixture.session, &mint, &state_address, 0, 100)
        .await
        .expect("mint");

    let wrong_minter =
        verify::verify_wpokt_state(&fixture.session, &mint, &Pubkey::new_unique()).await;
    assert!(matches!(
        wrong_minter,
        Err(HarnessError::Verify(VerifyError::Minter { .. }))
    ));

    let wrong_supply = verify::verify_mint(&fixture.session, &mint, &state_address, 0, 99).await;
    assert!(matches!(
        wrong_supply,
        Err(HarnessError::Verify(VerifyError::Supply { .. }))
    ));
}

#[tokio::test]
async fn test_verify_accounts_uninitialized() {
    let fixture = create_fixture();
    let mint = Pubkey::new_unique();

    let missing = verify::verify_accounts_uninitialized(&fixture.session, &mint).await;
    assert!(matches!(missing, Err(HarnessError::AccountNotFound(_))));

    fixture
        .ledger
        .put_account(mint, TOKEN_PROGRAM_ID, vec![0u8; MintAccount::LEN])
        .await;
    verify::verify_accounts_uninitialized(&fixture.session, &mint)
        .await
        .expect("fresh accounts");

    let (state_address, _) =
        derive_wpokt_address(&fixture.wpokt_program_id, &mint).expect("derive");
    fixture
        .ledger
        .put_record(
            state_address,
            fixture.wpokt_program_id,
            &WpoktState::default(),
        )
        .await;
    let taken = verify::verify_accounts_uninitialized(&fixture.session, &mint).await;
    assert!(matches!(
        taken,
        Err(HarnessError::Verify(VerifyError::Initialization { .. }))
    ));
}

#[tokio::test]
async fn test_verify_permit() {
    let fixture = create_fixture();
    let owner = fixture.session.payer().pubkey();
    let mint = Pubkey::new_unique();
    let source = Pubkey::new_unique();
    let delegate = Pubkey::new_unique();
    let (nonce_account, _) =
        derive_nonce_address(&fixture.wpokt_program_id, &owner, &mint).expect("derive");

    fixture
        .ledger
        .put_record(
            nonce_account,
            fixture.wpokt_program_id,
            &NonceEntry { owner, nonce: 1 },
        )
        .await;
    let mut source_account = token_account(mint, owner, 100);
    source_account.delegate = Some(delegate).into();
    source_account.delegated_amount = 40;
    fixture
        .ledger
        .put_packed(source, source_account)
        .await;

    let expected = ExpectedPermit {
        mint,
        owner,
        nonce_account,
        nonce: 1,
        source_token_account: source,
        delegate_token_account: delegate,
        value: 40,
    };
    verify::verify_permit(&fixture.session, &expected)
        .await
        .expect("permit");

    let wrong_value = ExpectedPermit {
        value: 41,
        ..expected
    };
    assert!(matches!(
        verify::verify_permit(&fixture.session, &wrong_value).await,
        Err(HarnessError::Verify(VerifyError::DelegatedAmount { .. }))
    ));

    let wrong_account = ExpectedPermit {
        nonce_account: Pubkey::new_unique(),
        ..expected
    };
    assert!(matches!(
        verify::verify_permit(&fixture.session, &wrong_account).await,
        Err(HarnessError::Sdk(SdkError::AddressMismatch { .. }))
    ));
}
