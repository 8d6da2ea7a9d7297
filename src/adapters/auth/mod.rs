//! Authentication adapters - Implementations of the `SessionValidator` port.
//!
//! - `JwtSessionValidator` - HS256 bearer tokens with issuer/audience checks
//! - `MockSessionValidator` - Token map for tests

mod jwt;
mod mock;

pub use jwt::{Audience, JwtConfig, JwtSessionValidator, SessionClaims};
pub use mock::MockSessionValidator;
