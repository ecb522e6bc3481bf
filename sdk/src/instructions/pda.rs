//! PDA derivation utilities for bridge and WPOKT accounts.
//!
//! Provides functions to derive Program Derived Addresses (PDAs) for every
//! account the two programs create. Numeric seeds are always encoded as
//! 8-byte little-endian integers; the on-chain programs derive with the same
//! encoding and any other width yields a different address.

use solana_sdk::pubkey::Pubkey;

use crate::error::SdkError;

/// Namespace seed shared by all bridge PDAs.
pub const BRIDGE_SEED: &[u8] = b"bridge";

/// Seed for the bridge global state.
pub const SIGNATURE_ACCOUNT_SEED: &[u8] = b"signature_account";

/// Seed for claimed markers.
pub const CLAIMED_DICTIONARY_SEED: &[u8] = b"claimed_dictionary_key";

/// Seed for token-list entries.
pub const TOKEN_LIST_DICTIONARY_SEED: &[u8] = b"token_list_dictionary_key";

/// Seed for daily-token-claims counters.
pub const DAILY_TOKEN_CLAIMS_DICTIONARY_SEED: &[u8] = b"daily_token_claims_dictionary_key";

/// Seed for token-added markers.
pub const TOKEN_ADDED_DICTIONARY_SEED: &[u8] = b"token_added_dictionary";

/// Seed for the bridge-owned token account.
pub const BRIDGE_TOKEN_ACCOUNT_SEED: &[u8] = b"bridge_token_account";

/// Namespace seed shared by all WPOKT PDAs.
pub const WPOKT_SEED: &[u8] = b"WPOKT";

/// Seed for the WPOKT global state.
pub const GLOBAL_STATE_SEED: &[u8] = b"global_state_account";

/// Seed for nonce entries.
pub const NONCES_DICTIONARY_SEED: &[u8] = b"nonces_dictionary_key";

/// Seed for authorization state entries.
pub const AUTHORIZATION_DICTIONARY_SEED: &[u8] = b"authorization_dictionary_key";

/// Encodes a numeric seed as 8 little-endian bytes.
#[must_use]
pub const fn seed_u64(value: u64) -> [u8; 8] {
    value.to_le_bytes()
}

fn derive(
    label: &'static str,
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), SdkError> {
    Pubkey::try_find_program_address(seeds, program_id)
        .ok_or(SdkError::DerivationExhausted(label))
}

/// Derives a PDA from arbitrary ordered seeds.
///
/// # Errors
///
/// Returns [`SdkError::DerivationExhausted`] if no bump yields an off-curve
/// address.
pub fn derive_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8), SdkError> {
    derive("address", seeds, program_id)
}

/// Derives the bridge global state PDA.
///
/// Seeds: `[b"bridge", b"signature_account"]`
///
/// # Errors
///
/// Returns an error if derivation is exhausted.
pub fn derive_bridge_address(program_id: &Pubkey) -> Result<(Pubkey, u8), SdkError> {
    derive(
        "bridge state",
        &[BRIDGE_SEED, SIGNATURE_ACCOUNT_SEED],
        program_id,
    )
}

/// Derives the claimed marker PDA for one inbound transfer.
///
/// Seeds: `[chain_id_le, index_le, b"bridge", b"claimed_dictionary_key"]`
///
/// # Errors
///
/// Returns an error if derivation is exhausted.
pub fn derive_claimed_address(
    program_id: &Pubkey,
    chain_id: u64,
    index: u64,
) -> Result<(Pubkey, u8), SdkError> {
    derive(
        "claimed marker",
        &[
            &seed_u64(chain_id),
            &seed_u64(index),
            BRIDGE_SEED,
            CLAIMED_DICTIONARY_SEED,
        ],
        program_id,
    )
}

/// Derives the token-list entry PDA.
///
/// Seeds: `[token_index_le, b"bridge", b"token_list_dictionary_key"]`
///
/// # Errors
///
/// Returns an error if derivation is exhausted.
pub fn derive_token_list_address(
    program_id: &Pubkey,
    token_index: u64,
) -> Result<(Pubkey, u8), SdkError> {
    derive(
        "token list entry",
        &[
            &seed_u64(token_index),
            BRIDGE_SEED,
            TOKEN_LIST_DICTIONARY_SEED,
        ],
        program_id,
    )
}

/// Derives the daily-token-claims counter PDA.
///
/// Seeds: `[token_index_le, b"bridge", b"daily_token_claims_dictionary_key"]`
///
/// # Errors
///
/// Returns an error if derivation is exhausted.
pub fn derive_daily_token_claims_address(
    program_id: &Pubkey,
    token_index: u64,
) -> Result<(Pubkey, u8), SdkError> {
    derive(
        "daily token claims",
        &[
            &seed_u64(token_index),
            BRIDGE_SEED,
            DAILY_TOKEN_CLAIMS_DICTIONARY_SEED,
        ],
        program_id,
    )
}

/// Derives the token-added marker PDA.
///
/// Seeds: `[mint, b"bridge", b"token_added_dictionary"]`
///
/// # Errors
///
/// Returns an error if derivation is exhausted.
pub fn derive_token_added_address(
    program_id: &Pubkey,
    mint: &Pubkey,
) -> Result<(Pubkey, u8), SdkError> {
    derive(
        "token added marker",
        &[mint.as_ref(), BRIDGE_SEED, TOKEN_ADDED_DICTIONARY_SEED],
        program_id,
    )
}

/// Derives the token account the bridge holds for a mint.
///
/// Seeds: `[mint, b"bridge", b"bridge_token_account"]`
///
/// # Errors
///
/// Returns an error if derivation is exhausted.
pub fn derive_bridge_token_account_address(
    program_id: &Pubkey,
    mint: &Pubkey,
) -> Result<(Pubkey, u8), SdkError> {
    derive(
        "bridge token account",
        &[mint.as_ref(), BRIDGE_SEED, BRIDGE_TOKEN_ACCOUNT_SEED],
        program_id,
    )
}

/// Derives the WPOKT global state PDA.
///
/// Seeds: `[mint, b"WPOKT", b"global_state_account"]`
///
/// # Errors
///
/// Returns an error if derivation is exhausted.
pub fn derive_wpokt_address(
    program_id: &Pubkey,
    mint: &Pubkey,
) -> Result<(Pubkey, u8), SdkError> {
    derive(
        "wpokt state",
        &[mint.as_ref(), WPOKT_SEED, GLOBAL_STATE_SEED],
        program_id,
    )
}

/// Derives the nonce entry PDA of an owner.
///
/// Seeds: `[owner, mint, b"WPOKT", b"nonces_dictionary_key"]`
///
/// # Errors
///
/// Returns an error if derivation is exhausted.
pub fn derive_nonce_address(
    program_id: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<(Pubkey, u8), SdkError> {
    derive(
        "nonce entry",
        &[
            owner.as_ref(),
            mint.as_ref(),
            WPOKT_SEED,
            NONCES_DICTIONARY_SEED,
        ],
        program_id,
    )
}

/// Derives the authorization state PDA of a (signer, nonce) pair.
///
/// Seeds: `[from, nonce, mint, b"WPOKT", b"authorization_dictionary_key"]`
///
/// # Errors
///
/// Returns an error if derivation is exhausted.
pub fn derive_authorization_address(
    program_id: &Pubkey,
    from: &Pubkey,
    nonce: &[u8; 32],
    mint: &Pubkey,
) -> Result<(Pubkey, u8), SdkError> {
    derive(
        "authorization state",
        &[
            from.as_ref(),
            nonce,
            mint.as_ref(),
            WPOKT_SEED,
            AUTHORIZATION_DICTIONARY_SEED,
        ],
        program_id,
    )
}

/// Bridge accounts tied to one registered token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgePdas {
    /// Bridge global state.
    pub bridge: Pubkey,
    /// Bridge state bump.
    pub bridge_bump: u8,
    /// Token-list entry.
    pub token_list: Pubkey,
    /// Token-list bump.
    pub token_list_bump: u8,
    /// Token-added marker.
    pub token_added: Pubkey,
    /// Token-added bump.
    pub token_added_bump: u8,
    /// Bridge-owned token account.
    pub bridge_token_account: Pubkey,
    /// Bridge token account bump.
    pub bridge_token_account_bump: u8,
}

impl BridgePdas {
    /// Derives all PDAs for a token index and mint.
    ///
    /// # Errors
    ///
    /// Returns an error if any derivation is exhausted.
    pub fn derive(program_id: &Pubkey, token_index: u64, mint: &Pubkey) -> Result<Self, SdkError> {
        let (bridge, bridge_bump) = derive_bridge_address(program_id)?;
        let (token_list, token_list_bump) = derive_token_list_address(program_id, token_index)?;
        let (token_added, token_added_bump) = derive_token_added_address(program_id, mint)?;
        let (bridge_token_account, bridge_token_account_bump) =
            derive_bridge_token_account_address(program_id, mint)?;

        Ok(Self {
            bridge,
            bridge_bump,
            token_list,
            token_list_bump,
            token_added,
            token_added_bump,
            bridge_token_account,
            bridge_token_account_bump,
        })
    }
}

/// Accounts touched when an inbound transfer is claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimPdas {
    /// Claimed marker for (chain id, transfer index).
    pub claimed: Pubkey,
    /// Claimed marker bump.
    pub claimed_bump: u8,
    /// Daily claims counter for the token.
    pub daily_token_claims: Pubkey,
    /// Daily claims bump.
    pub daily_token_claims_bump: u8,
}

impl ClaimPdas {
    /// Derives the claim-side PDAs.
    ///
    /// # Errors
    ///
    /// Returns an error if any derivation is exhausted.
    pub fn derive(
        program_id: &Pubkey,
        token_index: u64,
        chain_id: u64,
        index: u64,
    ) -> Result<Self, SdkError> {
        let (claimed, claimed_bump) = derive_claimed_address(program_id, chain_id, index)?;
        let (daily_token_claims, daily_token_claims_bump) =
            derive_daily_token_claims_address(program_id, token_index)?;

        Ok(Self {
            claimed,
            claimed_bump,
            daily_token_claims,
            daily_token_claims_bump,
        })
    }
}

/// WPOKT accounts used by an owner's permit flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WpoktPdas {
    /// WPOKT global state.
    pub wpokt: Pubkey,
    /// Global state bump.
    pub wpokt_bump: u8,
    /// Nonce entry of the owner.
    pub nonce_entry: Pubkey,
    /// Nonce entry bump.
    pub nonce_entry_bump: u8,
}

impl WpoktPdas {
    /// Derives the global state and the nonce entry of `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if any derivation is exhausted.
    pub fn derive(program_id: &Pubkey, mint: &Pubkey, owner: &Pubkey) -> Result<Self, SdkError> {
        let (wpokt, wpokt_bump) = derive_wpokt_address(program_id, mint)?;
        let (nonce_entry, nonce_entry_bump) = derive_nonce_address(program_id, owner, mint)?;

        Ok(Self {
            wpokt,
            wpokt_bump,
            nonce_entry,
            nonce_entry_bump,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_program_id() -> Pubkey {
        Pubkey::new_unique()
    }

    fn test_mint() -> Pubkey {
        Pubkey::new_unique()
    }

    #[test]
    fn test_seed_u64_little_endian() {
        assert_eq!(seed_u64(1), [1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(seed_u64(0x0102), [2, 1, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_derive_bridge_address_deterministic() {
        let program_id = test_program_id();
        let first = derive_bridge_address(&program_id).expect("derive");
        let second = derive_bridge_address(&program_id).expect("derive");
        assert_eq!(first, second);
    }

    #[test]
    fn test_derive_bridge_address_matches_generic() {
        let program_id = test_program_id();
        let (addr, bump) = derive_bridge_address(&program_id).expect("derive");
        let generic =
            derive_address(&[b"bridge", b"signature_account"], &program_id).expect("derive");
        assert_eq!(generic, (addr, bump));
        let recreated =
            Pubkey::create_program_address(&[BRIDGE_SEED, SIGNATURE_ACCOUNT_SEED, &[bump]], &program_id)
                .expect("valid bump");
        assert_eq!(recreated, addr);
    }

    #[test]
    fn test_numeric_seed_width_changes_address() {
        let program_id = test_program_id();
        let (fixed, _) = derive_token_list_address(&program_id, 1).expect("derive");
        let (narrow, _) =
            derive_address(&[&[1u8], BRIDGE_SEED, TOKEN_LIST_DICTIONARY_SEED], &program_id)
                .expect("derive");
        assert_ne!(fixed, narrow);
    }

    #[test]
    fn test_numeric_seed_endianness_changes_address() {
        let program_id = test_program_id();
        let (le, _) = derive_token_list_address(&program_id, 7).expect("derive");
        let (be, _) = derive_address(
            &[&7u64.to_be_bytes(), BRIDGE_SEED, TOKEN_LIST_DICTIONARY_SEED],
            &program_id,
        )
        .expect("derive");
        assert_ne!(le, be);
    }

    #[test]
    fn test_claimed_seed_order_matters() {
        let program_id = test_program_id();
        let (a, _) = derive_claimed_address(&program_id, 1, 2).expect("derive");
        let (b, _) = derive_claimed_address(&program_id, 2, 1).expect("derive");
        assert_ne!(a, b);
    }

    #[test]
    fn test_token_list_differs_by_index() {
        let program_id = test_program_id();
        let (a, _) = derive_token_list_address(&program_id, 0).expect("derive");
        let (b, _) = derive_token_list_address(&program_id, 1).expect("derive");
        assert_ne!(a, b);
    }

    #[test]
    fn test_token_list_and_daily_claims_distinct() {
        let program_id = test_program_id();
        let (a, _) = derive_token_list_address(&program_id, 3).expect("derive");
        let (b, _) = derive_daily_token_claims_address(&program_id, 3).expect("derive");
        assert_ne!(a, b);
    }

    #[test]
    fn test_nonce_address_depends_on_mint() {
        let program_id = test_program_id();
        let owner = Pubkey::new_unique();
        let (a, _) = derive_nonce_address(&program_id, &owner, &test_mint()).expect("derive");
        let (b, _) = derive_nonce_address(&program_id, &owner, &test_mint()).expect("derive");
        assert_ne!(a, b);
    }

    #[test]
    fn test_authorization_address_depends_on_nonce() {
        let program_id = test_program_id();
        let from = Pubkey::new_unique();
        let mint = test_mint();
        let (a, _) =
            derive_authorization_address(&program_id, &from, &[1u8; 32], &mint).expect("derive");
        let (b, _) =
            derive_authorization_address(&program_id, &from, &[2u8; 32], &mint).expect("derive");
        assert_ne!(a, b);
    }

    #[test]
    fn test_wpokt_address_per_mint() {
        let program_id = test_program_id();
        let (a, _) = derive_wpokt_address(&program_id, &test_mint()).expect("derive");
        let (b, _) = derive_wpokt_address(&program_id, &test_mint()).expect("derive");
        assert_ne!(a, b);
    }

    #[test]
    fn test_bridge_pdas_derive() {
        let program_id = test_program_id();
        let mint = test_mint();
        let pdas = BridgePdas::derive(&program_id, 0, &mint).expect("derive");

        assert_eq!(
            pdas.bridge,
            derive_bridge_address(&program_id).expect("derive").0
        );
        assert_eq!(
            pdas.token_list,
            derive_token_list_address(&program_id, 0).expect("derive").0
        );
        assert_eq!(
            pdas.token_added,
            derive_token_added_address(&program_id, &mint).expect("derive").0
        );
        assert_ne!(pdas.bridge_token_account, pdas.token_added);
    }

    #[test]
    fn test_claim_pdas_derive() {
        let program_id = test_program_id();
        let pdas = ClaimPdas::derive(&program_id, 0, 5, 9).expect("derive");
        assert_eq!(
            pdas.claimed,
            derive_claimed_address(&program_id, 5, 9).expect("derive").0
        );
        assert_eq!(
            pdas.daily_token_claims,
            derive_daily_token_claims_address(&program_id, 0)
                .expect("derive")
                .0
        );
    }

    #[test]
    fn test_wpokt_pdas_derive() {
        let program_id = test_program_id();
        let mint = test_mint();
        let owner = Pubkey::new_unique();
        let pdas = WpoktPdas::derive(&program_id, &mint, &owner).expect("derive");
        assert_eq!(
            pdas.wpokt,
            derive_wpokt_address(&program_id, &mint).expect("derive").0
        );
        assert_eq!(
            pdas.nonce_entry,
            derive_nonce_address(&program_id, &owner, &mint)
                .expect("derive")
                .0
        );
    }
}
