pub mod datetime;
pub mod filter;
pub mod invoice;
pub mod plans;
pub mod stats;
pub mod status;

mod error;
pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;
