//! Auth domain - staff sessions for the admin dashboard
//!
//! Tokens are issued by the external identity provider and verified here;
//! `GET /api/auth/session` reports who the caller is.

pub mod jwt;
pub mod routes;

pub use jwt::{Claims, JwtService};
pub use routes::router;
