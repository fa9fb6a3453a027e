pub mod signing;

// Re-export all port traits for convenience
pub use signing::{ClientFactory, SigningClient};
