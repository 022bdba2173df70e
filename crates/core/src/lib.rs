//! Domain building blocks shared by the storage and HTTP crates.

pub mod datetime;
pub mod error;
pub mod todo;
pub mod types;
