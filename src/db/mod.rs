// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export database components

#[cfg(test)]
pub mod memory;
pub mod repository;
pub mod schema;

pub use repository::*;
pub use schema::ensure_schema;
