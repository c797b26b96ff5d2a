//! Admission configuration.

use serde::{Deserialize, Serialize};

/// Protocol constants consulted during admission.
///
/// These are consensus parameters: every node in the network must run
/// with identical values or verdicts diverge.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdmissionConfig {
    /// Minimum seconds between a block and its parent.
    pub min_block_interval: u64,
    /// Width of one miner slot in seconds; the rotation counter is the
    /// number of whole slots elapsed since the parent.
    pub block_slot: u64,
    /// Divisor bounding per-block gas-limit drift.
    pub gas_limit_bound_divisor: u64,
    /// Hard floor for the gas limit.
    pub min_gas_limit: u64,
    /// Gas limit the controller drifts toward under sustained load.
    pub target_gas_limit: u64,
    /// Height at which the state-root computation switches to the
    /// upgraded trie rules; `None` means the upgrade never activates.
    pub state_fork_height: Option<u64>,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            min_block_interval: 5,
            block_slot: 10,
            gas_limit_bound_divisor: 1024,
            min_gas_limit: 5000,
            target_gas_limit: 4_712_388,
            state_fork_height: None,
        }
    }
}

impl AdmissionConfig {
    /// Whether the state-root upgrade is active at `number`.
    pub fn is_state_fork(&self, number: u64) -> bool {
        self.state_fork_height.is_some_and(|h| number >= h)
    }
}
