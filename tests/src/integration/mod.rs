//! Cross-crate integration: the full admission pipeline over real keys,
//! real commitments and the in-memory chain adapters.

pub mod admission_pipeline;
pub mod leader_rotation;
