pub mod errors;
pub mod matches;
pub mod messages;
pub mod score;
pub mod stats;

// Re-export all types
pub use errors::*;
pub use matches::*;
pub use messages::*;
pub use score::*;
pub use stats::*;
