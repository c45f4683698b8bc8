#![forbid(unsafe_code)]

pub mod assessment;
pub mod error;
pub mod model;
pub mod roadmap;

pub use error::ValidationError;
