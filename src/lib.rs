//! # Allocsim - Stable-matching simulator for address block allocation
//!
//! This library pairs Autonomous Systems seeking new address space with
//! allocatable IP blocks, using preference-based stable matching instead
//! of arbitrary or biased assignment.
//!
//! ## Overview
//!
//! A registry holding a pool of free address blocks wants to hand them
//! out so that as many recipients as possible can aggregate the new
//! block with the prefix they already announce. Allocsim models this as
//! a two-sided matching market: every AS ranks every block by how well
//! it aggregates with its home prefix, every block ranks every AS by
//! the same symmetric score, and requester-proposing deferred acceptance
//! (Gale-Shapley) produces a stable assignment. An experiment harness
//! generates synthetic instances and compares the aggregation quality of
//! the stable assignment against a uniformly random pairing.
//!
//! ## Key Features
//!
//! - **Structured prefixes**: CIDR text is parsed once into packed
//!   address blocks; all scoring and matching runs on the binary form
//! - **Topology-aware preferences**: shared-prefix length weighted over
//!   allocation-size similarity
//! - **Stable assignment**: requester-optimal deferred acceptance with a
//!   proposal bound of requesters x blocks
//! - **Random baseline**: every experiment reports how a uniform random
//!   pairing would have scored on the same instance
//! - **Reproducible**: seeded RNG gives deterministic experiments
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `config`: experiment configuration structures and validation
//! - `config_loader`: configuration file loading
//! - `ip`: address block modelling and prefix relations
//! - `matching`: preference ranking and the stable matching engine
//! - `experiment`: instance generation, trial execution, and reporting
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use allocsim::config::Config;
//! use allocsim::experiment;
//!
//! let config = Config::default();
//! let results = experiment::run_experiment(&config)?;
//! println!(
//!     "mean aggregatable pairs: {:.2} stable vs {:.2} random",
//!     results.stable_mean, results.random_mean
//! );
//! # Ok::<(), color_eyre::eyre::Report>(())
//! ```
//!
//! ## Error Handling
//!
//! Module boundaries use `thiserror` enums (`BlockError`,
//! `PreferenceError`, `ValidationError`); the application layer wraps
//! them in `color_eyre` reports with context.

pub mod config;
pub mod config_loader;
pub mod ip;
pub mod matching;
pub mod experiment;
