//! Token identifiers and the bit-packed token id codec
//!
//! A respect token is identified by a single 256-bit value that packs the
//! owner, the period it was earned in and the kind of mint that created it:
//!
//! ```text
//!  bits 255..232   231..224    223..160        159..0
//! +-------------+-----------+--------------+----------------+
//! | reserved(0) | mint_type | period_number|     owner      |
//! +-------------+-----------+--------------+----------------+
//!    3 bytes       1 byte       8 bytes         20 bytes
//! ```
//!
//! The value is stored big-endian, so byte 0 holds the most significant bits.

use crate::address::{Address, ADDRESS_BYTES};
use num_bigint::BigUint;
use num_traits::Num;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width of a token identifier in bytes.
pub const TOKEN_ID_BYTES: usize = 32;

const RESERVED_BYTES: usize = 3;
const MINT_TYPE_OFFSET: usize = RESERVED_BYTES;
const PERIOD_OFFSET: usize = MINT_TYPE_OFFSET + 1;
const OWNER_OFFSET: usize = PERIOD_OFFSET + 8;

/// Errors produced by the token id codec and token id parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("period number {0} does not fit in 64 bits")]
    PeriodOutOfRange(u128),
    #[error("mint type {0} does not fit in 8 bits")]
    MintTypeOutOfRange(u32),
    #[error("token id is not a valid decimal or 0x-hex integer: {0}")]
    InvalidTokenId(String),
    #[error("token id does not fit in 256 bits")]
    TokenIdOverflow,
}

/// 256-bit token identifier, big-endian.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenId(pub [u8; TOKEN_ID_BYTES]);

impl TokenId {
    pub const fn from_be_bytes(bytes: [u8; TOKEN_ID_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn to_be_bytes(&self) -> [u8; TOKEN_ID_BYTES] {
        self.0
    }

    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }

    /// Build a token id from an arbitrary unsigned integer, failing if it
    /// needs more than 256 bits.
    pub fn from_biguint(value: &BigUint) -> Result<Self, CodecError> {
        let bytes = value.to_bytes_be();
        if bytes.len() > TOKEN_ID_BYTES {
            return Err(CodecError::TokenIdOverflow);
        }
        let mut out = [0u8; TOKEN_ID_BYTES];
        out[TOKEN_ID_BYTES - bytes.len()..].copy_from_slice(&bytes);
        Ok(Self(out))
    }

    /// Whether any of the 24 reserved high bits is set.
    ///
    /// Ids produced by [`pack_token_id`] never set them; ids handed in by
    /// callers might.
    pub fn has_reserved_bits(&self) -> bool {
        self.0[..RESERVED_BYTES].iter().any(|b| *b != 0)
    }

    pub fn owner(&self) -> Address {
        unpack_token_id(self).owner
    }

    pub fn period_number(&self) -> u64 {
        unpack_token_id(self).period_number
    }

    pub fn mint_type(&self) -> u8 {
        unpack_token_id(self).mint_type
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_biguint())
    }
}

impl FromStr for TokenId {
    type Err = CodecError;

    /// Parses decimal, or hex when prefixed with `0x`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex_digits) if !hex_digits.is_empty() => BigUint::from_str_radix(hex_digits, 16),
            Some(_) => return Err(CodecError::InvalidTokenId(s.to_string())),
            None => BigUint::from_str_radix(s, 10),
        }
        .map_err(|_| CodecError::InvalidTokenId(s.to_string()))?;
        Self::from_biguint(&parsed)
    }
}

impl From<TokenId> for String {
    fn from(value: TokenId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for TokenId {
    type Error = CodecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The logical fields packed into a [`TokenId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenIdData {
    pub owner: Address,
    pub period_number: u64,
    pub mint_type: u8,
}

impl TokenIdData {
    pub fn new(owner: Address, period_number: u64, mint_type: u8) -> Self {
        Self {
            owner,
            period_number,
            mint_type,
        }
    }

    /// Checked construction from wider integers.
    pub fn try_from_wide(
        owner: Address,
        period_number: u128,
        mint_type: u32,
    ) -> Result<Self, CodecError> {
        let period_number = u64::try_from(period_number)
            .map_err(|_| CodecError::PeriodOutOfRange(period_number))?;
        let mint_type =
            u8::try_from(mint_type).map_err(|_| CodecError::MintTypeOutOfRange(mint_type))?;
        Ok(Self::new(owner, period_number, mint_type))
    }

    pub fn pack(&self) -> TokenId {
        pack_token_id(self)
    }
}

impl From<TokenId> for TokenIdData {
    fn from(id: TokenId) -> Self {
        unpack_token_id(&id)
    }
}

/// Pack owner, period and mint type into a token id. Reserved bits are zero.
pub fn pack_token_id(data: &TokenIdData) -> TokenId {
    let mut bytes = [0u8; TOKEN_ID_BYTES];
    bytes[MINT_TYPE_OFFSET] = data.mint_type;
    bytes[PERIOD_OFFSET..OWNER_OFFSET].copy_from_slice(&data.period_number.to_be_bytes());
    bytes[OWNER_OFFSET..].copy_from_slice(data.owner.as_bytes());
    TokenId(bytes)
}

/// Pack from wider integers, silently keeping only the low 64 bits of the
/// period and the low 8 bits of the mint type.
///
/// Two different inputs can therefore collide; use
/// [`TokenIdData::try_from_wide`] when that matters.
pub fn pack_token_id_lossy(owner: Address, period_number: u128, mint_type: u32) -> TokenId {
    pack_token_id(&TokenIdData::new(
        owner,
        period_number as u64,
        mint_type as u8,
    ))
}

/// Slice a token id back into its fields. Never fails; reserved bits are
/// ignored.
pub fn unpack_token_id(id: &TokenId) -> TokenIdData {
    let bytes = &id.0;
    let mut period = [0u8; 8];
    period.copy_from_slice(&bytes[PERIOD_OFFSET..OWNER_OFFSET]);
    let mut owner = [0u8; ADDRESS_BYTES];
    owner.copy_from_slice(&bytes[OWNER_OFFSET..]);
    TokenIdData {
        owner: Address(owner),
        period_number: u64::from_be_bytes(period),
        mint_type: bytes[MINT_TYPE_OFFSET],
    }
}
