//! Core business logic for givehub.

pub mod services;

pub use services::*;
