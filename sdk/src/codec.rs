//! Fixed-layout binary codec.
//!
//! Every instruction and account handled by the SDK is a little-endian,
//! unpadded sequence of fixed-width fields. [`Encoder`] writes such a
//! sequence against a declared span and [`Decoder`] reads one back, failing
//! on short input instead of padding.

use solana_sdk::pubkey::Pubkey;

use crate::error::SdkError;

/// Width of a public key field.
pub const PUBKEY_LEN: usize = 32;

/// Width of a `u64` field.
pub const U64_LEN: usize = 8;

/// Writes fields into a buffer sized to a declared span.
#[derive(Debug, Clone)]
pub struct Encoder {
    buf: Vec<u8>,
    span: usize,
}

impl Encoder {
    /// Creates an encoder for a payload of exactly `span` bytes.
    #[must_use]
    pub fn with_span(span: usize) -> Self {
        Self {
            buf: Vec::with_capacity(span),
            span,
        }
    }

    /// Writes a single byte.
    pub fn put_u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    /// Writes a little-endian `u32`.
    pub fn put_u32(&mut self, value: u32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Writes a little-endian `u64`.
    pub fn put_u64(&mut self, value: u64) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Writes a boolean as `0` or `1`.
    pub fn put_bool(&mut self, value: bool) -> &mut Self {
        self.buf.push(u8::from(value));
        self
    }

    /// Writes the 32 raw bytes of a public key.
    pub fn put_pubkey(&mut self, value: &Pubkey) -> &mut Self {
        self.buf.extend_from_slice(value.as_ref());
        self
    }

    /// Writes a fixed 32-byte array.
    pub fn put_bytes32(&mut self, value: &[u8; 32]) -> &mut Self {
        self.buf.extend_from_slice(value);
        self
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing was written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the encoded bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::SpanMismatch`] if the written length differs from
    /// the declared span.
    pub fn finish(self) -> Result<Vec<u8>, SdkError> {
        if self.buf.len() != self.span {
            return Err(SdkError::SpanMismatch {
                expected: self.span,
                actual: self.buf.len(),
            });
        }
        Ok(self.buf)
    }
}

/// Reads fields sequentially from a byte slice.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Returns the number of unread bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], SdkError> {
        let end = self.offset.saturating_add(N);
        let bytes = self
            .data
            .get(self.offset..end)
            .ok_or(SdkError::Truncated {
                offset: self.offset,
                needed: N,
            })?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        self.offset = end;
        Ok(out)
    }

    /// Reads a single byte.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is exhausted.
    pub fn read_u8(&mut self) -> Result<u8, SdkError> {
        let [b] = self.take::<1>()?;
        Ok(b)
    }

    /// Reads a little-endian `u32`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is too short.
    pub fn read_u32(&mut self) -> Result<u32, SdkError> {
        Ok(u32::from_le_bytes(self.take::<4>()?))
    }

    /// Reads a little-endian `u64`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is too short.
    pub fn read_u64(&mut self) -> Result<u64, SdkError> {
        Ok(u64::from_le_bytes(self.take::<8>()?))
    }

    /// Reads a strict boolean byte.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::InvalidBool`] for any byte other than 0 or 1.
    pub fn read_bool(&mut self, field: &'static str) -> Result<bool, SdkError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(SdkError::InvalidBool { field, value }),
        }
    }

    /// Reads a public key.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is too short.
    pub fn read_pubkey(&mut self) -> Result<Pubkey, SdkError> {
        Ok(Pubkey::new_from_array(self.take::<PUBKEY_LEN>()?))
    }

    /// Reads a fixed 32-byte array.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is too short.
    pub fn read_bytes32(&mut self) -> Result<[u8; 32], SdkError> {
        self.take::<32>()
    }

    /// Checks that every byte was consumed.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::TrailingBytes`] if input remains.
    pub fn finish(self) -> Result<(), SdkError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(SdkError::TrailingBytes(n)),
        }
    }
}

/// A fixed-span account record.
pub trait AccountLayout: Sized {
    /// Human-readable layout name used in errors.
    const NAME: &'static str;

    /// Exact byte span of the record.
    const LEN: usize;

    /// Writes the fields in layout order.
    fn encode_fields(&self, enc: &mut Encoder);

    /// Reads the fields in layout order.
    ///
    /// # Errors
    ///
    /// Returns an error if a field cannot be decoded.
    fn decode_fields(dec: &mut Decoder<'_>) -> Result<Self, SdkError>;

    /// Serializes the record into exactly [`Self::LEN`] bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the fields do not fill the span.
    fn pack(&self) -> Result<Vec<u8>, SdkError> {
        let mut enc = Encoder::with_span(Self::LEN);
        self.encode_fields(&mut enc);
        enc.finish()
    }

    /// Decodes a record from an account blob of exactly [`Self::LEN`] bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::LengthMismatch`] for blobs of any other length and
    /// field errors for malformed content.
    fn unpack(data: &[u8]) -> Result<Self, SdkError> {
        if data.len() != Self::LEN {
            return Err(SdkError::LengthMismatch {
                layout: Self::NAME,
                expected: Self::LEN,
                actual: data.len(),
            });
        }
        let mut dec = Decoder::new(data);
        let record = Self::decode_fields(&mut dec)?;
        dec.finish()?;
        Ok(record)
    }
}
