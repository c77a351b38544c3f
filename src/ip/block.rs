//! Structured address block representation.
//!
//! Blocks are parsed from CIDR text once at ingestion and carried as a
//! packed network address plus prefix length. Everything downstream
//! (scoring, ranking, matching) consumes the structured form; nothing
//! re-parses strings mid-algorithm.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Width in bits of the address space the simulator models.
pub const ADDRESS_WIDTH: u8 = 32;

/// Errors that can occur when constructing an address block
#[derive(Debug, thiserror::Error)]
pub enum BlockError {
    #[error("Invalid prefix length /{0}: must be between 0 and 32")]
    PrefixLength(u8),

    #[error("Malformed CIDR '{input}': expected <address>/<prefix>")]
    Malformed { input: String },

    #[error("Invalid network address in '{input}'")]
    Address { input: String },
}

/// An IPv4 address block: network address plus prefix length.
///
/// Host bits below the prefix are zeroed at construction, so two blocks
/// compare equal exactly when they describe the same network. Immutable
/// once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressBlock {
    bits: u32,
    prefix_len: u8,
}

impl AddressBlock {
    /// Create a block from an address and prefix length, masking any host bits.
    pub fn new(addr: Ipv4Addr, prefix_len: u8) -> Result<Self, BlockError> {
        if prefix_len > ADDRESS_WIDTH {
            return Err(BlockError::PrefixLength(prefix_len));
        }
        Ok(AddressBlock {
            bits: u32::from(addr) & prefix_mask(prefix_len),
            prefix_len,
        })
    }

    /// Network address as raw bits.
    pub fn network_bits(&self) -> u32 {
        self.bits
    }

    /// Network address.
    pub fn network_address(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.bits)
    }

    /// Prefix length.
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// True if this block contains `other`. Equal blocks count as containment.
    pub fn is_supernet_of(&self, other: &AddressBlock) -> bool {
        self.prefix_len <= other.prefix_len
            && (other.bits & prefix_mask(self.prefix_len)) == self.bits
    }
}

/// Bit mask selecting the leading `len` bits of an address.
pub(crate) fn prefix_mask(len: u8) -> u32 {
    if len == 0 {
        0
    } else {
        u32::MAX << (ADDRESS_WIDTH - len)
    }
}

impl FromStr for AddressBlock {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr_part, len_part) = s.split_once('/').ok_or_else(|| BlockError::Malformed {
            input: s.to_string(),
        })?;
        let addr: Ipv4Addr = addr_part.parse().map_err(|_| BlockError::Address {
            input: s.to_string(),
        })?;
        let prefix_len: u8 = len_part.parse().map_err(|_| BlockError::Malformed {
            input: s.to_string(),
        })?;
        AddressBlock::new(addr, prefix_len)
    }
}

impl fmt::Display for AddressBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network_address(), self.prefix_len)
    }
}
