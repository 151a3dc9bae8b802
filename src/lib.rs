//! API key issuance service.
//!
//! Issues opaque `sk-<kid>-<payload>` keys, stores only their HMAC-SHA256
//! digests, validates presented keys by digest lookup, and revokes keys by
//! their public `kid`.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx, behind the `KeyStore` trait
//! - **Hashing**: HMAC-SHA256 keyed with a server secret
//! - **Format**: JSON requests/responses with a `success` flag

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;
