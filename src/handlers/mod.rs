//! HTTP request handlers (route handlers).
//!
//! Handlers extract the JSON body, check required fields, call the
//! credential service, and wrap the result in a `success` envelope.

/// Service health endpoint
pub mod health;
/// Key lifecycle endpoints
pub mod keys;
