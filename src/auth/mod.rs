//! Authentication for hearth
//!
//! Provides:
//! - Password hashing with Argon2
//! - JWT token issuance and verification (30-day validity)

pub mod jwt;
pub mod password;

pub use jwt::{extract_token_from_header, Claims, TokenService};
pub use password::{hash_password, verify_password};
