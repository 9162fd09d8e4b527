// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod health;
pub mod movies;

pub use health::config as health_config;
pub use movies::config as movies_config;
