//! Pure domain logic: configuration, errors, the leader sequence and the
//! gas-limit controller.

pub mod config;
pub mod error;
pub mod gas;
pub mod leader;

pub use config::AdmissionConfig;
pub use error::{AdmissionError, AdmissionResult};
pub use gas::next_gas_limit;
pub use leader::{calc_next_qr, elected_index, eligibility_level, rotation_counter};
