//! SeaORM entity definitions

pub mod challenge;
pub mod submission;
pub mod user;

pub use challenge::Status;
