//! Driven ports (outbound dependencies).
//!
//! Admission reads chain and registry state through these contracts and
//! never mutates anything behind them. Callers construct a consistent
//! state snapshot, hold it immutable for the duration of one validation
//! call, and pass it in; that is what makes parallel validation of blocks
//! at different heights safe.

use crate::domain::AdmissionResult;
use shared_types::{Address, Block, Hash};
use std::sync::Arc;

/// An immutable view of the world state at one point in the chain.
pub trait StateSnapshot: Send + Sync {
    /// Root of the state trie as it stands in this snapshot.
    ///
    /// `state_fork` selects the upgraded trie rules; the flag is derived
    /// from the block number by the caller's `AdmissionConfig`.
    fn intermediate_root(&self, state_fork: bool) -> Hash;
}

/// Read-only index over the canonical chain.
pub trait ChainIndex: Send + Sync {
    /// Whether the block is fully present: header, body and state.
    fn has_block_and_state(&self, hash: &Hash, number: u64) -> bool;

    /// Whether the block is present at all, even with its state pruned.
    fn has_block(&self, hash: &Hash, number: u64) -> bool;

    /// Snapshot of the current canonical state, if one is available.
    fn current_state(&self) -> Option<Arc<dyn StateSnapshot>>;
}

/// The consensus engine's uncle discipline. Uncle legality (count bounds,
/// ancestor depth, duplicates) stays with the engine; admission surfaces
/// its verdict unchanged.
pub trait ConsensusEngine: Send + Sync {
    fn verify_uncles(
        &self,
        chain: &dyn ChainIndex,
        block: &Block,
        state: &dyn StateSnapshot,
    ) -> AdmissionResult<()>;
}

/// Registration standing of a candidate miner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinerStatus {
    /// Registered and in good standing.
    Active,
    /// Registered but currently serving a punishment.
    Punished,
    /// Never registered.
    Unregistered,
}

/// Read-only accessor over the on-chain miner registry. The registry's
/// own bookkeeping (registration, punishment, index assignment) lives in
/// the registry contract; admission only queries it.
pub trait MinerRegistryView: Send + Sync {
    /// Total number of registered miners in this snapshot.
    fn miner_count(&self, state: &dyn StateSnapshot) -> u64;

    /// Standing of `address` in this snapshot.
    fn miner_status(&self, state: &dyn StateSnapshot, address: &Address) -> MinerStatus;

    /// Address registered at `index`, if the index is in range.
    fn miner_address(&self, state: &dyn StateSnapshot, index: u64) -> Option<Address>;
}
