//! Ports: the collaborator contracts admission depends on.

pub mod outbound;

pub use outbound::{ChainIndex, ConsensusEngine, MinerRegistryView, MinerStatus, StateSnapshot};
