//! Address parsing and derivation.

use alloy_primitives::Address;
use thiserror::Error;

/// Width of an account address in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// A byte string that is not a valid 20-byte address.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("expected {expected} address bytes, got {got}")]
pub struct AddressError {
    /// Required length.
    pub expected: usize,
    /// Length received.
    pub got: usize,
}

/// Parse a raw address field.
pub fn parse_address(bytes: &[u8]) -> Result<Address, AddressError> {
    if bytes.len() != ADDRESS_LENGTH {
        return Err(AddressError { expected: ADDRESS_LENGTH, got: bytes.len() });
    }
    Ok(Address::from_slice(bytes))
}

/// Derive the address of an account created by `creator` at `nonce`.
///
/// This is the CREATE derivation: `keccak256(rlp([creator, nonce]))[12..]`.
pub fn contract_address(creator: &Address, nonce: u64) -> Address {
    creator.create(nonce)
}
