//! SPL Token accounts read during verification.

use solana_program_pack::Pack;

use crate::error::SdkError;

pub use spl_token_interface::state::{
    Account as TokenAccount, AccountState as TokenAccountState, Mint as MintAccount,
};

/// Decodes an SPL Token record of exactly `T::LEN` bytes.
///
/// Uninitialized records decode as well, so a freshly allocated mint can be
/// checked before construction.
///
/// # Errors
///
/// Returns [`SdkError::LengthMismatch`] for blobs of any other length and
/// [`SdkError::TokenRecord`] for malformed content.
pub fn unpack_token_record<T: Pack>(data: &[u8]) -> Result<T, SdkError> {
    let layout = std::any::type_name::<T>();
    if data.len() != T::LEN {
        return Err(SdkError::LengthMismatch {
            layout,
            expected: T::LEN,
            actual: data.len(),
        });
    }
    T::unpack_unchecked(data).map_err(|e| SdkError::TokenRecord {
        layout,
        message: e.to_string(),
    })
}
