//! Prefix relations used for preference scoring.
//!
//! Pure functions over [`AddressBlock`] pairs: how many leading bits two
//! networks share, and whether two blocks could be merged into a single
//! routing entry.

use super::block::{prefix_mask, AddressBlock};

/// Count of leading bits identical between the two network addresses.
///
/// Compared over the full 32-bit width regardless of either block's own
/// prefix length, so the result may exceed both declared prefixes.
pub fn common_prefix_length(a: &AddressBlock, b: &AddressBlock) -> u32 {
    (a.network_bits() ^ b.network_bits()).leading_zeros()
}

/// True if the two blocks could be merged into a single routing entry.
///
/// Holds when one block already covers the other, or when both collapse
/// into the same parent network one bit shorter than the shorter of the
/// two prefixes. A prefix cannot be widened past /0, so that case is
/// not aggregatable rather than an error. Symmetric in its arguments.
pub fn is_aggregatable(a: &AddressBlock, b: &AddressBlock) -> bool {
    if a.is_supernet_of(b) || b.is_supernet_of(a) {
        return true;
    }
    let shorter = a.prefix_len().min(b.prefix_len());
    if shorter == 0 {
        return false;
    }
    let parent = prefix_mask(shorter - 1);
    (a.network_bits() & parent) == (b.network_bits() & parent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(s: &str) -> AddressBlock {
        s.parse().unwrap()
    }

    #[test]
    fn test_common_prefix_length() {
        assert_eq!(
            common_prefix_length(&block("10.0.0.0/24"), &block("10.0.0.0/23")),
            32
        );
        assert_eq!(
            common_prefix_length(&block("10.0.0.0/24"), &block("10.0.1.0/24")),
            23
        );
        assert_eq!(
            common_prefix_length(&block("10.0.0.0/24"), &block("11.0.0.0/24")),
            7
        );
        assert_eq!(
            common_prefix_length(&block("10.0.0.0/24"), &block("192.168.0.0/24")),
            0
        );
    }

    #[test]
    fn test_common_prefix_length_ignores_prefix_lengths() {
        // The bit comparison runs over the full width even though both
        // blocks declare short prefixes.
        assert_eq!(
            common_prefix_length(&block("10.0.0.0/8"), &block("10.0.0.0/12")),
            32
        );
    }

    #[test]
    fn test_supernet_pairs_aggregate() {
        assert!(is_aggregatable(&block("10.0.0.0/24"), &block("10.0.0.0/23")));
        assert!(is_aggregatable(&block("10.0.0.0/23"), &block("10.0.0.0/24")));
    }

    #[test]
    fn test_adjacent_siblings_aggregate() {
        // 10.0.0.0/24 and 10.0.1.0/24 merge into 10.0.0.0/23
        assert!(is_aggregatable(&block("10.0.0.0/24"), &block("10.0.1.0/24")));
    }

    #[test]
    fn test_same_size_non_siblings_do_not_aggregate() {
        // 10.0.1.0/24 and 10.0.2.0/24 sit in different /23 parents
        assert!(!is_aggregatable(&block("10.0.1.0/24"), &block("10.0.2.0/24")));
    }

    #[test]
    fn test_unrelated_blocks_do_not_aggregate() {
        assert!(!is_aggregatable(&block("10.0.0.0/24"), &block("192.168.0.0/24")));
    }

    #[test]
    fn test_zero_prefix_does_not_error() {
        // /0 covers everything, so the supernet check answers before the
        // widening step could underflow.
        assert!(is_aggregatable(&block("0.0.0.0/0"), &block("10.0.0.0/24")));
        assert!(is_aggregatable(&block("0.0.0.0/0"), &block("0.0.0.0/0")));
    }

    #[test]
    fn test_aggregation_is_symmetric() {
        let samples = [
            ("10.0.0.0/24", "10.0.0.0/23"),
            ("10.0.0.0/24", "10.0.1.0/24"),
            ("10.0.1.0/24", "10.0.2.0/24"),
            ("10.0.0.0/24", "192.168.0.0/24"),
            ("172.16.0.0/12", "172.20.0.0/14"),
            ("0.0.0.0/0", "198.51.100.0/24"),
        ];
        for (x, y) in samples {
            assert_eq!(
                is_aggregatable(&block(x), &block(y)),
                is_aggregatable(&block(y), &block(x)),
                "aggregation must be symmetric for {} and {}",
                x,
                y
            );
        }
    }
}
