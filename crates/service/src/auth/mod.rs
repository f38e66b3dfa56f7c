//! Admin auth: three-layer architecture (domain, repository, service).
//!
//! Login verifies an argon2 hash and issues an HS256 session token; the HTTP
//! layer verifies that token on every admin request.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
