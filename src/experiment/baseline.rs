//! Random assignment baseline and aggregation scoring.
//!
//! The stable matching is judged against a uniformly random pairing of
//! the same instance, scored with the same aggregation predicate.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::ip::{is_aggregatable, AddressBlock};
use crate::matching::Requester;

/// Pair requesters with uniformly shuffled blocks.
///
/// When the sides differ in size the surplus entities stay unmatched,
/// mirroring the engine's behaviour on unequal instances.
pub fn random_assignment<R: Rng>(
    requester_count: usize,
    block_count: usize,
    rng: &mut R,
) -> Vec<Option<usize>> {
    let mut order: Vec<usize> = (0..block_count).collect();
    order.shuffle(rng);
    (0..requester_count)
        .map(|r| order.get(r).copied())
        .collect()
}

/// Count assigned pairs whose block aggregates with the requester's home prefix.
pub fn count_aggregations(
    requesters: &[Requester],
    blocks: &[AddressBlock],
    assignments: &[Option<usize>],
) -> usize {
    assignments
        .iter()
        .enumerate()
        .filter_map(|(r, assigned)| assigned.map(|b| (r, b)))
        .filter(|&(r, b)| is_aggregatable(&requesters[r].home, &blocks[b]))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn block(s: &str) -> AddressBlock {
        s.parse().unwrap()
    }

    #[test]
    fn test_random_assignment_is_a_bijection() {
        let mut rng = StdRng::seed_from_u64(11);
        let assignment = random_assignment(8, 8, &mut rng);

        assert_eq!(assignment.len(), 8);
        let mut blocks: Vec<usize> = assignment.iter().map(|b| b.unwrap()).collect();
        blocks.sort_unstable();
        assert_eq!(blocks, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_surplus_requesters_stay_unmatched() {
        let mut rng = StdRng::seed_from_u64(11);
        let assignment = random_assignment(5, 3, &mut rng);

        assert_eq!(assignment.len(), 5);
        assert_eq!(assignment.iter().flatten().count(), 3);
        assert!(assignment[3].is_none());
        assert!(assignment[4].is_none());
    }

    #[test]
    fn test_count_aggregations() {
        let requesters = vec![
            Requester::new("AS1", block("10.0.0.0/24")),
            Requester::new("AS2", block("192.168.0.0/24")),
            Requester::new("AS3", block("172.16.0.0/24")),
        ];
        let blocks = vec![
            block("10.0.1.0/24"),
            block("198.51.100.0/24"),
            block("172.16.0.0/23"),
        ];

        // AS1 gets the adjacent sibling, AS2 an unrelated block, AS3 its supernet
        let assignments = vec![Some(0), Some(1), Some(2)];
        assert_eq!(count_aggregations(&requesters, &blocks, &assignments), 2);

        // Unmatched requesters contribute nothing
        let partial = vec![Some(0), None, None];
        assert_eq!(count_aggregations(&requesters, &blocks, &partial), 1);
    }
}
