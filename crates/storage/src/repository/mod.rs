pub mod application;
pub mod candidate;
pub mod preference;
pub mod program;
