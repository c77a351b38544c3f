//! Preference ranking from prefix compatibility.
//!
//! A single symmetric score serves both axes: requesters ordering blocks
//! and blocks ordering requesters. Rankings are total orders over the
//! full opposite set, with ties broken by input order.

use std::cmp::Reverse;

use log::debug;
use rayon::prelude::*;

use super::types::Requester;
use crate::ip::{common_prefix_length, AddressBlock, ADDRESS_WIDTH};

/// Errors raised when a preference table is not total
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("Preference list for requester {index} is not a permutation of the block set")]
    BadRequesterList { index: usize },

    #[error("Preference list for block {index} is not a permutation of the requester set")]
    BadBlockList { index: usize },
}

/// Compatibility score between two blocks, higher is better.
///
/// The shared-prefix term is weighted double so topological proximity
/// dominates mere similarity in allocation size. Symmetric in its
/// arguments.
pub fn compatibility_score(a: &AddressBlock, b: &AddressBlock) -> u32 {
    let shared = common_prefix_length(a, b);
    let size_gap = (i32::from(a.prefix_len()) - i32::from(b.prefix_len())).unsigned_abs();
    2 * shared + (u32::from(ADDRESS_WIDTH) - size_gap)
}

/// Rank all candidates for a subject block, best first.
///
/// Returns candidate indices sorted by descending score. The sort is
/// stable, so candidates with equal scores keep their input order.
pub fn rank_by_compatibility(subject: &AddressBlock, candidates: &[AddressBlock]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by_key(|&i| Reverse(compatibility_score(subject, &candidates[i])));
    order
}

/// Complete preference maps for one matching instance.
///
/// Every requester ranks every block and every block ranks every
/// requester. Totality is validated at construction so the engine can
/// assume well-formed lists.
#[derive(Debug, Clone)]
pub struct PreferenceTable {
    requester_prefs: Vec<Vec<usize>>,
    block_prefs: Vec<Vec<usize>>,
}

impl PreferenceTable {
    /// Rank both sides of an instance.
    ///
    /// The per-entity rankings are independent of each other, so they
    /// are computed in parallel. The sequential matching phase only
    /// starts once the table is complete.
    pub fn build(
        requesters: &[Requester],
        blocks: &[AddressBlock],
    ) -> Result<Self, PreferenceError> {
        let requester_prefs: Vec<Vec<usize>> = requesters
            .par_iter()
            .map(|r| rank_by_compatibility(&r.home, blocks))
            .collect();

        let homes: Vec<AddressBlock> = requesters.iter().map(|r| r.home).collect();
        let block_prefs: Vec<Vec<usize>> = blocks
            .par_iter()
            .map(|b| rank_by_compatibility(b, &homes))
            .collect();

        if log::log_enabled!(log::Level::Debug) {
            for (r, prefs) in requester_prefs.iter().enumerate() {
                let order: Vec<String> = prefs.iter().map(|&b| blocks[b].to_string()).collect();
                debug!(
                    "Preference order for {} ({}): {}",
                    requesters[r].id,
                    requesters[r].home,
                    order.join(", ")
                );
            }
            for (b, prefs) in block_prefs.iter().enumerate() {
                let order: Vec<String> = prefs.iter().map(|&r| requesters[r].id.clone()).collect();
                debug!("Preference order for block {}: {}", blocks[b], order.join(", "));
            }
        }

        Self::from_lists(requester_prefs, block_prefs)
    }

    /// Assemble a table from pre-computed lists, validating totality.
    ///
    /// Each requester list must be a permutation of the block indices
    /// and each block list a permutation of the requester indices;
    /// anything else fails loudly here instead of producing a silently
    /// wrong matching later.
    pub fn from_lists(
        requester_prefs: Vec<Vec<usize>>,
        block_prefs: Vec<Vec<usize>>,
    ) -> Result<Self, PreferenceError> {
        let requester_count = requester_prefs.len();
        let block_count = block_prefs.len();

        for (index, list) in requester_prefs.iter().enumerate() {
            if !is_permutation(list, block_count) {
                return Err(PreferenceError::BadRequesterList { index });
            }
        }
        for (index, list) in block_prefs.iter().enumerate() {
            if !is_permutation(list, requester_count) {
                return Err(PreferenceError::BadBlockList { index });
            }
        }

        Ok(PreferenceTable {
            requester_prefs,
            block_prefs,
        })
    }

    pub fn requester_count(&self) -> usize {
        self.requester_prefs.len()
    }

    pub fn block_count(&self) -> usize {
        self.block_prefs.len()
    }

    /// Per-requester block rankings, best first.
    pub fn requester_prefs(&self) -> &[Vec<usize>] {
        &self.requester_prefs
    }

    /// Per-block requester rankings, best first.
    pub fn block_prefs(&self) -> &[Vec<usize>] {
        &self.block_prefs
    }
}

/// True if `list` contains each index in `0..len` exactly once.
fn is_permutation(list: &[usize], len: usize) -> bool {
    if list.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &i in list {
        if i >= len || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}
