pub mod auth;
pub mod rate_limit;

pub use auth::{optional_auth, require_admin, require_auth, AuthUser};
pub use rate_limit::{rate_limit_middleware, RateLimiter};
