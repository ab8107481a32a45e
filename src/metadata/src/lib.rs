pub mod error;
pub mod projects;
pub mod timestamp;

pub use error::Result;
