pub mod config;
pub mod formatting;
pub mod parsing;

// Re-exports
pub use config::*;
pub use parsing::*;
