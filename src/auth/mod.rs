//! Identity tokens and authorization middleware

pub mod middleware;
pub mod token;

pub use middleware::AuthUser;
