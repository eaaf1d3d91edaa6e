// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod health;
pub mod recommendations;
pub mod relay;

pub use health::config as health_config;
pub use recommendations::config as recommendations_config;
pub use relay::config as relay_config;
pub use relay::not_found;
