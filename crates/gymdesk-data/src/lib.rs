
// Operations
mod operations;
pub use operations::*;

// Models
mod members;
pub use members::*;

mod payment;
pub use payment::*;
