mod signing_client;

pub use signing_client::{ClientFactory, SigningClient};
