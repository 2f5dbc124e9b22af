pub mod admission;
pub mod reports;
