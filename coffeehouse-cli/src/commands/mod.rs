//! Command implementations for the coffeehouse CLI

pub mod drinks;
pub mod schema;

pub use drinks::run_drinks;
pub use schema::run_schema;
