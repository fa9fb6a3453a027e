mod presign_errors;
mod validation_errors;

pub use presign_errors::*;
pub use validation_errors::*;
