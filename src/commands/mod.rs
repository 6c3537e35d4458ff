pub mod analyze;
pub mod fetch;
pub mod serve;

// Re-export command functions for convenience
pub use analyze::analyze;
pub use fetch::fetch;
pub use serve::{serve, ServeParams};
