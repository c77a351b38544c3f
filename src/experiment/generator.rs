//! Synthetic instance generation.
//!
//! Each AS home prefix and each allocatable block is carved from one of
//! a handful of configured base networks, so generated instances contain
//! a realistic mix of near-neighbour and unrelated prefixes. All
//! randomness flows through the caller's RNG; a seeded generator yields
//! fully reproducible instances.

use std::net::Ipv4Addr;

use rand::Rng;

use crate::config::{ExperimentConfig, GenerationConfig};
use crate::ip::{AddressBlock, BlockError, ADDRESS_WIDTH};
use crate::matching::Requester;

/// Generate the requester and block sets for one trial.
///
/// Requesters are labelled `AS1..ASn` in generation order.
pub fn generate_instance<R: Rng>(
    bases: &[AddressBlock],
    experiment: &ExperimentConfig,
    generation: &GenerationConfig,
    rng: &mut R,
) -> Result<(Vec<Requester>, Vec<AddressBlock>), BlockError> {
    let mut requesters = Vec::with_capacity(experiment.as_count);
    for i in 1..=experiment.as_count {
        let home = random_block(bases, generation, rng)?;
        requesters.push(Requester::new(format!("AS{}", i), home));
    }

    let mut blocks = Vec::with_capacity(experiment.block_count);
    for _ in 0..experiment.block_count {
        blocks.push(random_block(bases, generation, rng)?);
    }

    Ok((requesters, blocks))
}

/// Draw one block: pick a base network, a host address inside it, and a
/// prefix length from the configured range.
fn random_block<R: Rng>(
    bases: &[AddressBlock],
    generation: &GenerationConfig,
    rng: &mut R,
) -> Result<AddressBlock, BlockError> {
    let base = bases[rng.gen_range(0..bases.len())];
    let host = random_host(&base, rng);
    let prefix_len = rng.gen_range(generation.min_prefix_len..=generation.max_prefix_len);
    AddressBlock::new(host, prefix_len)
}

/// Uniform host address within a base network, excluding the network
/// and broadcast addresses. Base prefixes longer than /30 are rejected
/// at configuration validation, so the range is never empty.
fn random_host<R: Rng>(base: &AddressBlock, rng: &mut R) -> Ipv4Addr {
    let span = 1u64 << (u32::from(ADDRESS_WIDTH) - u32::from(base.prefix_len()));
    let offset = rng.gen_range(1..span - 1) as u32;
    Ipv4Addr::from(base.network_bits() + offset)
}
