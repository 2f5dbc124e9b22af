pub mod application;
pub mod candidate;
pub mod preference;
pub mod program;

pub use application::{Application, STATUS_VALIDATED};
pub use candidate::Candidate;
pub use preference::Preference;
pub use program::Program;
