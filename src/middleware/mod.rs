// src/middleware/mod.rs
// DOCUMENTATION: Middleware module organization
// PURPOSE: Re-export middleware components

pub mod cors;

pub use cors::*;
