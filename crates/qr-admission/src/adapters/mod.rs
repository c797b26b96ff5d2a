//! Adapters: in-memory implementations of the outbound ports, used by the
//! test suites and by downstream callers wiring admission in isolation.

pub mod memory;

pub use memory::{FailingEngine, MemoryChainIndex, MemoryRegistry, MemoryStateSnapshot, NoopEngine};
