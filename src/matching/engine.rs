//! Requester-proposing deferred acceptance.
//!
//! The classic Gale-Shapley engine: free requesters propose down their
//! preference lists, blocks hold at most one tentative acceptance and
//! trade up when a strictly preferred proposer arrives. The requester
//! side must stay the proposing side; the result is requester-optimal
//! among all stable matchings, and flipping the proposer flips that
//! optimality to the blocks.

use std::collections::VecDeque;

use log::debug;

use super::preference::PreferenceTable;
use super::types::Matching;

/// Run deferred acceptance over a preference table.
///
/// Displaced requesters re-enter the free queue with their proposal
/// cursor intact, so each preference list is walked at most once and
/// the total number of proposals is bounded by requesters x blocks.
/// A requester that exhausts its list stays unmatched; with unequal
/// side sizes this is the expected terminal state, not an error.
pub fn stable_match(prefs: &PreferenceTable) -> Matching {
    let requester_count = prefs.requester_count();
    let block_count = prefs.block_count();

    // Position of each requester within each block's list, for O(1)
    // comparisons when a block decides whether to trade up.
    let block_rank: Vec<Vec<usize>> = prefs
        .block_prefs()
        .iter()
        .map(|list| {
            let mut rank = vec![0usize; requester_count];
            for (position, &requester) in list.iter().enumerate() {
                rank[requester] = position;
            }
            rank
        })
        .collect();

    let mut free: VecDeque<usize> = (0..requester_count).collect();
    let mut holder: Vec<Option<usize>> = vec![None; block_count];
    let mut assignments: Vec<Option<usize>> = vec![None; requester_count];
    let mut cursor = vec![0usize; requester_count];
    let mut proposals = 0usize;

    while let Some(requester) = free.pop_front() {
        let list = &prefs.requester_prefs()[requester];
        while cursor[requester] < list.len() {
            let block = list[cursor[requester]];
            cursor[requester] += 1;
            proposals += 1;

            match holder[block] {
                None => {
                    debug!("requester {} claims free block {}", requester, block);
                    holder[block] = Some(requester);
                    assignments[requester] = Some(block);
                    break;
                }
                Some(current) if block_rank[block][requester] < block_rank[block][current] => {
                    debug!(
                        "block {} trades requester {} for requester {}",
                        block, current, requester
                    );
                    holder[block] = Some(requester);
                    assignments[requester] = Some(block);
                    assignments[current] = None;
                    free.push_back(current);
                    break;
                }
                Some(_) => {
                    // Rejected, move on to the next preference
                }
            }
        }
        // Exhausting the list without acceptance leaves the requester
        // permanently unmatched.
    }

    debug!(
        "matching complete: {} proposals for {} requesters and {} blocks",
        proposals, requester_count, block_count
    );
    Matching::new(assignments, proposals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(requester_prefs: Vec<Vec<usize>>, block_prefs: Vec<Vec<usize>>) -> PreferenceTable {
        PreferenceTable::from_lists(requester_prefs, block_prefs).unwrap()
    }

    #[test]
    fn test_single_block_goes_to_preferred_requester() {
        // Both requesters want the only block; the block prefers
        // requester 1, so requester 1 wins regardless of proposal order.
        let prefs = table(vec![vec![0], vec![0]], vec![vec![1, 0]]);
        let matching = stable_match(&prefs);

        assert_eq!(matching.block_for(1), Some(0));
        assert_eq!(matching.block_for(0), None);
        assert_eq!(matching.matched_count(), 1);
    }

    #[test]
    fn test_single_block_other_preference() {
        // Same instance with the block's preference reversed.
        let prefs = table(vec![vec![0], vec![0]], vec![vec![0, 1]]);
        let matching = stable_match(&prefs);

        assert_eq!(matching.block_for(0), Some(0));
        assert_eq!(matching.block_for(1), None);
    }

    #[test]
    fn test_displacement_reenters_queue() {
        // Requester 0 takes block 0 first, is displaced by requester 1,
        // and settles on block 1.
        let prefs = table(
            vec![vec![0, 1], vec![0, 1]],
            vec![vec![1, 0], vec![0, 1]],
        );
        let matching = stable_match(&prefs);

        assert_eq!(matching.block_for(1), Some(0));
        assert_eq!(matching.block_for(0), Some(1));
        assert_eq!(matching.matched_count(), 2);
    }

    #[test]
    fn test_more_requesters_than_blocks() {
        let prefs = table(
            vec![vec![0, 1], vec![1, 0], vec![0, 1]],
            vec![vec![0, 1, 2], vec![2, 1, 0]],
        );
        let matching = stable_match(&prefs);

        assert_eq!(matching.matched_count(), 2);
        // Every matched block is held by exactly one requester
        let mut blocks: Vec<usize> = matching.pairs().map(|(_, b)| b).collect();
        blocks.sort_unstable();
        blocks.dedup();
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_more_blocks_than_requesters() {
        let prefs = table(
            vec![vec![2, 0, 1]],
            vec![vec![0], vec![0], vec![0]],
        );
        let matching = stable_match(&prefs);

        // The lone requester gets its top choice; the other blocks stay free
        assert_eq!(matching.block_for(0), Some(2));
        assert_eq!(matching.matched_count(), 1);
    }

    #[test]
    fn test_proposal_bound() {
        // Worst case cannot exceed requesters x blocks
        let prefs = table(
            vec![vec![0, 1, 2], vec![0, 1, 2], vec![0, 1, 2]],
            vec![vec![2, 1, 0], vec![2, 1, 0], vec![2, 1, 0]],
        );
        let matching = stable_match(&prefs);

        assert_eq!(matching.matched_count(), 3);
        assert!(matching.proposals() <= 9);
    }

    #[test]
    fn test_empty_instance() {
        let prefs = table(vec![], vec![]);
        let matching = stable_match(&prefs);
        assert_eq!(matching.matched_count(), 0);
        assert_eq!(matching.proposals(), 0);
    }
}
