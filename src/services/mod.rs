mod disk_manager;
mod dual_endpoint_issuer;

pub use disk_manager::DiskManager;
pub use dual_endpoint_issuer::DualEndpointIssuer;
