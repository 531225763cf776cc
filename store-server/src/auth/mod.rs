//! Authentication Module
//!
//! JWT issuance/validation for the back-office surface, Argon2 password
//! hashing for admin credentials, and the bearer middleware guarding
//! `/api/admin/` routes.

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, JwtConfig, JwtService};
pub use middleware::require_admin_auth;

/// Authenticated admin injected into request extensions by the middleware
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub admin_id: String,
    pub username: String,
}

impl From<Claims> for CurrentAdmin {
    fn from(claims: Claims) -> Self {
        Self {
            admin_id: claims.sub,
            username: claims.username,
        }
    }
}
