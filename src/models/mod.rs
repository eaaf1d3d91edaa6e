// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod answer;
pub mod location;
pub mod photo;
pub mod place;
pub mod recommendation;

pub use answer::*;
pub use location::*;
pub use photo::*;
pub use place::*;
pub use recommendation::*;
