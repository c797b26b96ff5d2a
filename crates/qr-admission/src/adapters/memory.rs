//! In-memory port implementations.
//!
//! Production nodes back these ports with the chain database and the
//! miner-registry contract; these adapters keep everything in process so
//! admission can be exercised deterministically and in isolation.

use crate::domain::{AdmissionError, AdmissionResult};
use crate::ports::{ChainIndex, ConsensusEngine, MinerRegistryView, MinerStatus, StateSnapshot};
use parking_lot::RwLock;
use shared_types::{Address, Block, Hash};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A state snapshot with fixed roots for each trie-rule era.
#[derive(Debug, Clone)]
pub struct MemoryStateSnapshot {
    pub legacy_root: Hash,
    pub fork_root: Hash,
}

impl MemoryStateSnapshot {
    pub fn new(legacy_root: Hash, fork_root: Hash) -> Self {
        Self {
            legacy_root,
            fork_root,
        }
    }
}

impl StateSnapshot for MemoryStateSnapshot {
    fn intermediate_root(&self, state_fork: bool) -> Hash {
        if state_fork {
            self.fork_root
        } else {
            self.legacy_root
        }
    }
}

#[derive(Default)]
struct ChainInner {
    /// (hash, number) -> whether the block's state is still present.
    blocks: HashMap<(Hash, u64), bool>,
    state: Option<Arc<dyn StateSnapshot>>,
}

/// In-memory chain index.
#[derive(Default)]
pub struct MemoryChainIndex {
    inner: RwLock<ChainInner>,
}

impl MemoryChainIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a block; `with_state` marks its state as retained.
    pub fn insert(&self, hash: Hash, number: u64, with_state: bool) {
        self.inner.write().blocks.insert((hash, number), with_state);
    }

    /// Drop a recorded block's state, as pruning would.
    pub fn prune_state(&self, hash: Hash, number: u64) {
        if let Some(has_state) = self.inner.write().blocks.get_mut(&(hash, number)) {
            *has_state = false;
        }
    }

    /// Install the current canonical state snapshot.
    pub fn set_state(&self, state: Arc<dyn StateSnapshot>) {
        self.inner.write().state = Some(state);
    }
}

impl ChainIndex for MemoryChainIndex {
    fn has_block_and_state(&self, hash: &Hash, number: u64) -> bool {
        self.inner
            .read()
            .blocks
            .get(&(*hash, number))
            .copied()
            .unwrap_or(false)
    }

    fn has_block(&self, hash: &Hash, number: u64) -> bool {
        self.inner.read().blocks.contains_key(&(*hash, number))
    }

    fn current_state(&self) -> Option<Arc<dyn StateSnapshot>> {
        self.inner.read().state.clone()
    }
}

#[derive(Default)]
struct RegistryInner {
    miners: Vec<Address>,
    punished: HashSet<Address>,
}

/// In-memory miner registry: an ordered list of registered addresses plus
/// a punishment set, mirroring what the registry contract exposes.
#[derive(Default)]
pub struct MemoryRegistry {
    inner: RwLock<RegistryInner>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a miner to the registry, returning its index.
    pub fn register(&self, address: Address) -> u64 {
        let mut inner = self.inner.write();
        inner.miners.push(address);
        (inner.miners.len() - 1) as u64
    }

    /// Mark a miner as punished.
    pub fn punish(&self, address: Address) {
        self.inner.write().punished.insert(address);
    }
}

impl MinerRegistryView for MemoryRegistry {
    fn miner_count(&self, _state: &dyn StateSnapshot) -> u64 {
        self.inner.read().miners.len() as u64
    }

    fn miner_status(&self, _state: &dyn StateSnapshot, address: &Address) -> MinerStatus {
        let inner = self.inner.read();
        if !inner.miners.contains(address) {
            MinerStatus::Unregistered
        } else if inner.punished.contains(address) {
            MinerStatus::Punished
        } else {
            MinerStatus::Active
        }
    }

    fn miner_address(&self, _state: &dyn StateSnapshot, index: u64) -> Option<Address> {
        self.inner.read().miners.get(index as usize).copied()
    }
}

/// Engine that accepts any uncle set.
#[derive(Debug, Default, Clone)]
pub struct NoopEngine;

impl ConsensusEngine for NoopEngine {
    fn verify_uncles(
        &self,
        _chain: &dyn ChainIndex,
        _block: &Block,
        _state: &dyn StateSnapshot,
    ) -> AdmissionResult<()> {
        Ok(())
    }
}

/// Engine that rejects every block, for surfacing-unchanged tests.
#[derive(Debug, Clone)]
pub struct FailingEngine(pub String);

impl ConsensusEngine for FailingEngine {
    fn verify_uncles(
        &self,
        _chain: &dyn ChainIndex,
        _block: &Block,
        _state: &dyn StateSnapshot,
    ) -> AdmissionResult<()> {
        Err(AdmissionError::Engine(self.0.clone()))
    }
}
