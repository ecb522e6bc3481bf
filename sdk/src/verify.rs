//! State checks against decoded accounts.
//!
//! Every check compares a decoded record with the values the caller expects
//! after an operation and reports the first mismatching field. Nothing here
//! touches the ledger; fetching lives in the harness.

use std::fmt::Display;

use solana_sdk::pubkey::Pubkey;

use crate::error::VerifyError;
use crate::state::{
    AuthorizationState, BridgeState, ClaimedMarker, DailyTokenClaims, MintAccount, NonceEntry,
    TokenAccount, TokenAddedMarker, TokenListEntry, WpoktState,
};

type Mismatch = fn(String, String) -> VerifyError;

fn ensure<T: PartialEq + Display>(
    expected: T,
    observed: T,
    mismatch: Mismatch,
) -> Result<(), VerifyError> {
    if expected == observed {
        Ok(())
    } else {
        Err(mismatch(expected.to_string(), observed.to_string()))
    }
}

fn show_key(key: Option<&Pubkey>) -> String {
    key.map_or_else(|| "none".to_string(), ToString::to_string)
}

fn ensure_key(
    expected: Option<&Pubkey>,
    observed: Option<&Pubkey>,
    mismatch: Mismatch,
) -> Result<(), VerifyError> {
    if expected == observed {
        Ok(())
    } else {
        Err(mismatch(show_key(expected), show_key(observed)))
    }
}

/// Base58 rendering of a 32-byte authorization nonce.
#[must_use]
pub fn show_nonce(nonce: &[u8; 32]) -> String {
    bs58::encode(nonce).into_string()
}

macro_rules! mismatch {
    ($variant:ident) => {
        |expected, observed| VerifyError::$variant { expected, observed }
    };
}

/// Expected bridge state right after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedBridge {
    /// Bridge owner.
    pub owner: Pubkey,
    /// Inbound transfer attestor.
    pub verify_address: Pubkey,
    /// Chain id.
    pub chain_id: u64,
    /// Stable fee.
    pub stable_fee: u64,
}

/// Checks the bridge global state written by construction.
///
/// # Errors
///
/// Returns the first mismatching field.
pub fn check_construction(state: &BridgeState, expected: &ExpectedBridge) -> Result<(), VerifyError> {
    ensure(true, state.is_initialized, mismatch!(Initialization))?;
    ensure(expected.owner, state.owner, mismatch!(Owner))?;
    ensure(
        expected.verify_address,
        state.verify_address,
        mismatch!(VerifyAddress),
    )?;
    ensure(expected.chain_id, state.chain_id, mismatch!(ChainId))?;
    ensure(expected.stable_fee, state.stable_fee, mismatch!(Fee))
}

/// Checks the next outbound transfer index of the bridge.
///
/// # Errors
///
/// Returns [`VerifyError::TransferIndex`] on mismatch.
pub fn check_transfer_index(state: &BridgeState, current_index: u64) -> Result<(), VerifyError> {
    ensure(
        current_index,
        state.current_index,
        mismatch!(TransferIndex),
    )
}

/// Checks a token-list entry registered for `token_address`.
///
/// # Errors
///
/// Returns the first mismatching field.
pub fn check_token_entry(
    entry: &TokenListEntry,
    token_address: &Pubkey,
    fee: u64,
    paused: bool,
) -> Result<(), VerifyError> {
    ensure(true, entry.is_initialized, mismatch!(Initialization))?;
    ensure(true, entry.exists, mismatch!(Initialization))?;
    ensure(*token_address, entry.token_address, mismatch!(TokenAddress))?;
    ensure(fee, entry.fee, mismatch!(Fee))?;
    ensure(paused, entry.paused, mismatch!(Paused))
}

/// Checks the token-added marker of a mint.
///
/// # Errors
///
/// Returns [`VerifyError::Initialization`] on mismatch.
pub fn check_token_added(marker: &TokenAddedMarker, added: bool) -> Result<(), VerifyError> {
    ensure(added, marker.token_added, mismatch!(Initialization))
}

/// Checks the claimed marker of an inbound transfer.
///
/// # Errors
///
/// Returns [`VerifyError::Claimed`] on mismatch.
pub fn check_claimed(marker: &ClaimedMarker, claimed: bool) -> Result<(), VerifyError> {
    ensure(claimed, marker.claimed, mismatch!(Claimed))
}

/// Checks the daily claims counter of a token.
///
/// # Errors
///
/// Returns [`VerifyError::DailyClaims`] on mismatch.
pub fn check_daily_claims(claims: &DailyTokenClaims, expected: u64) -> Result<(), VerifyError> {
    ensure(
        expected,
        claims.daily_token_claims,
        mismatch!(DailyClaims),
    )
}

/// Checks the WPOKT global state.
///
/// # Errors
///
/// Returns the first mismatching field.
pub fn check_wpokt_state(
    state: &WpoktState,
    initialized: bool,
    minter: &Pubkey,
    mint: &Pubkey,
) -> Result<(), VerifyError> {
    ensure(initialized, state.is_initialized, mismatch!(Initialization))?;
    ensure(*minter, state.minter, mismatch!(Minter))?;
    ensure(*mint, state.mint, mismatch!(Mint))
}

/// Checks the permit nonce counter of an owner.
///
/// # Errors
///
/// Returns the first mismatching field.
pub fn check_nonce_entry(entry: &NonceEntry, owner: &Pubkey, nonce: u64) -> Result<(), VerifyError> {
    ensure(*owner, entry.owner, mismatch!(Owner))?;
    ensure(nonce, entry.nonce, mismatch!(Nonce))
}

/// Checks an authorization state entry.
///
/// # Errors
///
/// Returns the first mismatching field.
pub fn check_authorization_state(
    state: &AuthorizationState,
    from: &Pubkey,
    nonce: &[u8; 32],
    authorization: bool,
) -> Result<(), VerifyError> {
    ensure(
        authorization,
        state.authorization,
        mismatch!(Authorization),
    )?;
    ensure(*from, state.from, mismatch!(Owner))?;
    if state.nonce != *nonce {
        return Err(VerifyError::Nonce {
            expected: show_nonce(nonce),
            observed: show_nonce(&state.nonce),
        });
    }
    Ok(())
}

/// Checks the mint and owner of a token account.
///
/// # Errors
///
/// Returns the first mismatching field.
pub fn check_token_account(
    account: &TokenAccount,
    mint: &Pubkey,
    owner: &Pubkey,
) -> Result<(), VerifyError> {
    ensure(*mint, account.mint, mismatch!(Mint))?;
    ensure(*owner, account.owner, mismatch!(Owner))
}

/// Checks a token account balance.
///
/// # Errors
///
/// Returns [`VerifyError::Balance`] on mismatch.
pub fn check_balance(account: &TokenAccount, amount: u64) -> Result<(), VerifyError> {
    ensure(amount, account.amount, mismatch!(Balance))
}

/// Checks the delegate approved on a token account by a permit.
///
/// # Errors
///
/// Returns the first mismatching field.
pub fn check_delegation(
    account: &TokenAccount,
    delegate: &Pubkey,
    delegated_amount: u64,
) -> Result<(), VerifyError> {
    ensure_key(
        Some(delegate),
        Option::from(account.delegate.as_ref()),
        mismatch!(Delegate),
    )?;
    ensure(
        delegated_amount,
        account.delegated_amount,
        mismatch!(DelegatedAmount),
    )
}

/// Checks a mint's initialization, authority and decimals.
///
/// # Errors
///
/// Returns the first mismatching field.
pub fn check_mint(
    mint: &MintAccount,
    initialized: bool,
    authority: Option<&Pubkey>,
    decimals: u8,
) -> Result<(), VerifyError> {
    ensure(initialized, mint.is_initialized, mismatch!(Initialization))?;
    ensure_key(
        authority,
        Option::from(mint.mint_authority.as_ref()),
        mismatch!(MintAuthority),
    )?;
    ensure(decimals, mint.decimals, mismatch!(Decimals))
}

/// Checks the circulating supply of a mint.
///
/// # Errors
///
/// Returns [`VerifyError::Supply`] on mismatch.
pub fn check_supply(mint: &MintAccount, supply: u64) -> Result<(), VerifyError> {
    ensure(supply, mint.supply, mismatch!(Supply))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constructed_bridge(owner: Pubkey, verify_address: Pubkey) -> BridgeState {
        BridgeState {
            is_initialized: true,
            owner,
            fee_update_duration: 1,
            verify_address,
            current_index: 1,
            chain_id: 3,
            stable_fee: 10,
            ..BridgeState::default()
        }
    }

    #[test]
    fn test_check_construction_passes() {
        let owner = Pubkey::new_unique();
        let verify_address = Pubkey::new_unique();
        let state = constructed_bridge(owner, verify_address);
        let expected = ExpectedBridge {
            owner,
            verify_address,
            chain_id: 3,
            stable_fee: 10,
        };
        assert_eq!(check_construction(&state, &expected), Ok(()));
    }

    #[test]
    fn test_check_construction_reports_chain_id() {
        let owner = Pubkey::new_unique();
        let verify_address = Pubkey::new_unique();
        let state = constructed_bridge(owner, verify_address);
        let expected = ExpectedBridge {
            owner,
            verify_address,
            chain_id: 4,
            stable_fee: 10,
        };
        let err = check_construction(&state, &expected).expect_err("chain id differs");
        assert_eq!(err.to_string(), "chain id: expected 4, observed 3");
    }

    #[test]
    fn test_check_construction_uninitialized() {
        let expected = ExpectedBridge {
            owner: Pubkey::default(),
            verify_address: Pubkey::default(),
            chain_id: 0,
            stable_fee: 0,
        };
        let err = check_construction(&BridgeState::default(), &expected)
            .expect_err("not initialized");
        assert!(matches!(err, VerifyError::Initialization { .. }));
    }

    #[test]
    fn test_check_transfer_index() {
        let state = constructed_bridge(Pubkey::new_unique(), Pubkey::new_unique());
        assert!(check_transfer_index(&state, 1).is_ok());
        assert!(matches!(
            check_transfer_index(&state, 2),
            Err(VerifyError::TransferIndex { .. })
        ));
    }

    #[test]
    fn test_check_token_entry() {
        let mint = Pubkey::new_unique();
        let entry = TokenListEntry {
            is_initialized: true,
            token_address: mint,
            exists: true,
            ..TokenListEntry::default()
        };
        assert!(check_token_entry(&entry, &mint, 0, false).is_ok());
        assert!(matches!(
            check_token_entry(&entry, &mint, 0, true),
            Err(VerifyError::Paused { .. })
        ));
        assert!(matches!(
            check_token_entry(&entry, &Pubkey::new_unique(), 0, false),
            Err(VerifyError::TokenAddress { .. })
        ));
    }

    #[test]
    fn test_check_claimed_and_daily_claims() {
        assert!(check_claimed(&ClaimedMarker { claimed: true }, true).is_ok());
        assert!(matches!(
            check_claimed(&ClaimedMarker { claimed: false }, true),
            Err(VerifyError::Claimed { .. })
        ));
        let claims = DailyTokenClaims {
            daily_token_claims: 5,
        };
        assert!(check_daily_claims(&claims, 5).is_ok());
        assert!(check_daily_claims(&claims, 6).is_err());
    }

    #[test]
    fn test_check_token_added() {
        assert!(check_token_added(&TokenAddedMarker { token_added: true }, true).is_ok());
        assert!(check_token_added(&TokenAddedMarker { token_added: false }, true).is_err());
    }

    #[test]
    fn test_check_wpokt_state() {
        let minter = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let state = WpoktState {
            is_initialized: true,
            minter,
            mint,
            ..WpoktState::default()
        };
        assert!(check_wpokt_state(&state, true, &minter, &mint).is_ok());
        assert!(matches!(
            check_wpokt_state(&state, true, &Pubkey::new_unique(), &mint),
            Err(VerifyError::Minter { .. })
        ));
        assert!(matches!(
            check_wpokt_state(&state, true, &minter, &Pubkey::new_unique()),
            Err(VerifyError::Mint { .. })
        ));
    }

    #[test]
    fn test_check_nonce_entry() {
        let owner = Pubkey::new_unique();
        let entry = NonceEntry { owner, nonce: 2 };
        assert!(check_nonce_entry(&entry, &owner, 2).is_ok());
        let err = check_nonce_entry(&entry, &owner, 1).expect_err("nonce differs");
        assert_eq!(err.to_string(), "nonce: expected 1, observed 2");
    }

    #[test]
    fn test_check_authorization_state() {
        let from = Pubkey::new_unique();
        let state = AuthorizationState {
            from,
            nonce: [7u8; 32],
            authorization: true,
        };
        assert!(check_authorization_state(&state, &from, &[7u8; 32], true).is_ok());
        assert!(matches!(
            check_authorization_state(&state, &from, &[7u8; 32], false),
            Err(VerifyError::Authorization { .. })
        ));
        let err = check_authorization_state(&state, &from, &[8u8; 32], true)
            .expect_err("nonce differs");
        assert_eq!(
            err,
            VerifyError::Nonce {
                expected: show_nonce(&[8u8; 32]),
                observed: show_nonce(&[7u8; 32]),
            }
        );
    }

    #[test]
    fn test_check_delegation() {
        let delegate = Pubkey::new_unique();
        let account = TokenAccount {
            delegate: Some(delegate).into(),
            delegated_amount: 100,
            ..TokenAccount::default()
        };
        assert!(check_delegation(&account, &delegate, 100).is_ok());
        assert!(matches!(
            check_delegation(&account, &delegate, 99),
            Err(VerifyError::DelegatedAmount { .. })
        ));

        let err = check_delegation(&TokenAccount::default(), &delegate, 0)
            .expect_err("no delegate");
        assert_eq!(
            err,
            VerifyError::Delegate {
                expected: delegate.to_string(),
                observed: "none".to_string(),
            }
        );
    }

    #[test]
    fn test_check_balance_and_token_account() {
        let mint = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let account = TokenAccount {
            mint,
            owner,
            amount: 42,
            ..TokenAccount::default()
        };
        assert!(check_balance(&account, 42).is_ok());
        assert!(matches!(
            check_balance(&account, 41),
            Err(VerifyError::Balance { .. })
        ));
        assert!(check_token_account(&account, &mint, &owner).is_ok());
        assert!(matches!(
            check_token_account(&account, &mint, &Pubkey::new_unique()),
            Err(VerifyError::Owner { .. })
        ));
    }

    #[test]
    fn test_check_mint() {
        let authority = Pubkey::new_unique();
        let mint = MintAccount {
            mint_authority: Some(authority).into(),
            decimals: 6,
            is_initialized: true,
            ..MintAccount::default()
        };
        assert!(check_mint(&mint, true, Some(&authority), 6).is_ok());
        assert!(matches!(
            check_mint(&mint, true, None, 6),
            Err(VerifyError::MintAuthority { .. })
        ));
        assert!(matches!(
            check_mint(&mint, true, Some(&authority), 9),
            Err(VerifyError::Decimals { .. })
        ));
        assert!(matches!(
            check_mint(&MintAccount::default(), false, None, 0),
            Ok(())
        ));
    }

    #[test]
    fn test_check_supply() {
        let mint = MintAccount {
            supply: 100,
            ..MintAccount::default()
        };
        assert!(check_supply(&mint, 100).is_ok());
        assert!(matches!(
            check_supply(&mint, 50),
            Err(VerifyError::Supply { .. })
        ));
    }
}
