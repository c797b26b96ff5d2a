//! # Gas-Limit Policy
//!
//! Bounded proportional controller for the next block's gas limit. The
//! limit moves by at most `parent_limit / divisor - 1` per block in
//! either direction, drifting toward the configured target under
//! sustained over- or under-utilization. Miner strategy, not consensus:
//! block production consults this, admission does not.

use super::config::AdmissionConfig;

/// Compute the gas limit of the block after a parent with the given
/// usage and limit. Pure function, no failure mode.
pub fn next_gas_limit(parent_gas_used: u64, parent_gas_limit: u64, config: &AdmissionConfig) -> u64 {
    // contrib = (parentGasUsed * 3 / 2) / divisor
    let contrib =
        (parent_gas_used + parent_gas_used / 2) / config.gas_limit_bound_divisor;

    // decay = parentGasLimit / divisor - 1
    let decay = (parent_gas_limit / config.gas_limit_bound_divisor).saturating_sub(1);

    // The limit rises when the parent ran above two thirds full and falls
    // when it ran below, by an amount proportional to the distance.
    let mut limit = parent_gas_limit
        .saturating_sub(decay)
        .saturating_add(contrib);
    if limit < config.min_gas_limit {
        limit = config.min_gas_limit;
    }

    // Below target: raise as fast as the bound allows instead.
    if limit < config.target_gas_limit {
        limit = parent_gas_limit.saturating_add(decay);
        if limit > config.target_gas_limit {
            limit = config.target_gas_limit;
        }
    }
    limit
}
