pub mod core;
pub mod errors;
pub mod schema;

pub use errors::*;
