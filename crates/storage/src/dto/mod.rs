pub mod allocation;
pub mod report;
