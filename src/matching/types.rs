//! Core types shared across the matching pipeline.

use crate::ip::AddressBlock;

/// An Autonomous System requesting an allocation.
///
/// The home block is the prefix the AS already announces; preference
/// scoring measures how well a candidate block aggregates with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    pub id: String,
    pub home: AddressBlock,
}

impl Requester {
    pub fn new(id: impl Into<String>, home: AddressBlock) -> Self {
        Requester {
            id: id.into(),
            home,
        }
    }
}

/// Final assignment of blocks to requesters.
///
/// At most one block per requester and one requester per block. Built
/// incrementally by the engine, immutable once returned.
#[derive(Debug, Clone)]
pub struct Matching {
    assignments: Vec<Option<usize>>,
    proposals: usize,
}

impl Matching {
    pub(crate) fn new(assignments: Vec<Option<usize>>, proposals: usize) -> Self {
        Matching {
            assignments,
            proposals,
        }
    }

    /// Block index assigned to the given requester index, if any.
    pub fn block_for(&self, requester: usize) -> Option<usize> {
        self.assignments.get(requester).copied().flatten()
    }

    /// Requester-indexed assignment slots.
    pub fn assignments(&self) -> &[Option<usize>] {
        &self.assignments
    }

    /// Matched (requester, block) index pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.assignments
            .iter()
            .enumerate()
            .filter_map(|(r, b)| b.map(|b| (r, b)))
    }

    /// Number of matched requesters.
    pub fn matched_count(&self) -> usize {
        self.assignments.iter().flatten().count()
    }

    /// Total proposals the engine made while building this matching.
    pub fn proposals(&self) -> usize {
        self.proposals
    }
}
