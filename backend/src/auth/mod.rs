//! Identity verification
//!
//! Users sign in with the external identity provider; requests carry its
//! bearer JWT, which this module verifies.

mod extractor;
mod jwt;

pub use extractor::AuthUser;
pub use jwt::{Claims, JwtService};
