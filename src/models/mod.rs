//! Data models representing database entities and API bodies.

/// API key record, projections, and request/response types
pub mod api_key;
