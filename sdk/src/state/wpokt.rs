//! WPOKT program account layouts.

use solana_sdk::pubkey::Pubkey;

use crate::codec::{AccountLayout, Decoder, Encoder};
use crate::error::SdkError;

/// WPOKT global state, one per mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WpoktState {
    /// Whether the program was constructed for this mint.
    pub is_initialized: bool,
    /// Authority allowed to mint.
    pub minter: Pubkey,
    /// Wrapped token mint.
    pub mint: Pubkey,
    /// Reserved reference to the nonce dictionary.
    pub nonces_dict: Pubkey,
    /// Reserved reference to the authorization dictionary.
    pub authorization_state_dict: Pubkey,
}

impl AccountLayout for WpoktState {
    const NAME: &'static str = "WpoktState";
    const LEN: usize = 129;

    fn encode_fields(&self, enc: &mut Encoder) {
        enc.put_bool(self.is_initialized)
            .put_pubkey(&self.minter)
            .put_pubkey(&self.mint)
            .put_pubkey(&self.nonces_dict)
            .put_pubkey(&self.authorization_state_dict);
    }

    fn decode_fields(dec: &mut Decoder<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            is_initialized: dec.read_bool("is_initialized")?,
            minter: dec.read_pubkey()?,
            mint: dec.read_pubkey()?,
            nonces_dict: dec.read_pubkey()?,
            authorization_state_dict: dec.read_pubkey()?,
        })
    }
}

/// Permit nonce counter of an owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NonceEntry {
    /// Owner of the counter.
    pub owner: Pubkey,
    /// Next nonce expected from the owner.
    pub nonce: u64,
}

impl AccountLayout for NonceEntry {
    const NAME: &'static str = "NonceEntry";
    const LEN: usize = 40;

    fn encode_fields(&self, enc: &mut Encoder) {
        enc.put_pubkey(&self.owner).put_u64(self.nonce);
    }

    fn decode_fields(dec: &mut Decoder<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            owner: dec.read_pubkey()?,
            nonce: dec.read_u64()?,
        })
    }
}

/// Use marker for a transfer-with-authorization nonce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthorizationState {
    /// Signer of the authorization.
    pub from: Pubkey,
    /// Authorization nonce.
    pub nonce: [u8; 32],
    /// Whether the authorization was consumed.
    pub authorization: bool,
}

impl AccountLayout for AuthorizationState {
    const NAME: &'static str = "AuthorizationState";
    const LEN: usize = 65;

    fn encode_fields(&self, enc: &mut Encoder) {
        enc.put_pubkey(&self.from)
            .put_bytes32(&self.nonce)
            .put_bool(self.authorization);
    }

    fn decode_fields(dec: &mut Decoder<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            from: dec.read_pubkey()?,
            nonce: dec.read_bytes32()?,
            authorization: dec.read_bool("authorization")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wpokt_state_roundtrip() {
        let state = WpoktState {
            is_initialized: true,
            minter: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            nonces_dict: Pubkey::default(),
            authorization_state_dict: Pubkey::default(),
        };
        let bytes = state.pack().expect("pack");
        assert_eq!(bytes.len(), 129);
        assert_eq!(&bytes[33..65], state.mint.as_ref());
        assert_eq!(WpoktState::unpack(&bytes), Ok(state));
    }

    #[test]
    fn test_wpokt_state_rejects_legacy_length() {
        assert!(WpoktState::unpack(&[0u8; 97]).is_err());
    }

    #[test]
    fn test_nonce_entry_roundtrip() {
        let entry = NonceEntry {
            owner: Pubkey::new_unique(),
            nonce: 4,
        };
        let bytes = entry.pack().expect("pack");
        assert_eq!(bytes.len(), 40);
        assert_eq!(&bytes[32..], &4u64.to_le_bytes());
        assert_eq!(NonceEntry::unpack(&bytes), Ok(entry));
    }

    #[test]
    fn test_authorization_state_roundtrip() {
        let state = AuthorizationState {
            from: Pubkey::new_unique(),
            nonce: [9u8; 32],
            authorization: true,
        };
        let bytes = state.pack().expect("pack");
        assert_eq!(bytes.len(), 65);
        assert_eq!(bytes[64], 1);
        assert_eq!(AuthorizationState::unpack(&bytes), Ok(state));
    }

    #[test]
    fn test_authorization_state_invalid_flag() {
        let mut bytes = vec![0u8; 65];
        bytes[64] = 0xff;
        assert_eq!(
            AuthorizationState::unpack(&bytes),
            Err(SdkError::InvalidBool {
                field: "authorization",
                value: 0xff
            })
        );
    }
}
