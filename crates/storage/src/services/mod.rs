pub mod allocation;
pub mod capacity;
pub mod ranking;
pub mod reports;
pub mod results;
pub mod source;

pub use allocation::{AllocationEngine, AllocationError};
pub use results::{ResultCache, ResultSnapshot};
pub use source::{AdmissionSource, InMemorySource, SourceRecords};
