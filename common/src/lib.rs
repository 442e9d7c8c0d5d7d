pub mod config;
pub mod error;
pub mod macros;
pub mod record;

pub use tracing;
