//! Record store adapters
//!
//! - `memory`: process-local store used by tests and the demo report

pub mod memory;

pub use memory::InMemoryRecordStore;
