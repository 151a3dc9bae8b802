//! Business logic services.
//!
//! Services contain the credential logic separated from HTTP handlers.

pub mod credential_service;
pub mod hasher;
pub mod key_generator;
