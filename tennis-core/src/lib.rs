pub mod completion;
pub mod match_resolver;
pub mod ranking;
pub mod score_parser;
pub mod score_validation;
pub mod stats;

// Re-export main components
pub use completion::*;
pub use match_resolver::*;
pub use ranking::*;
pub use score_parser::*;
pub use score_validation::*;
pub use stats::*;
