//! Authentication: token claims and the per-page session check.

mod claims;
mod session;

pub use claims::{decode_claims, TokenClaims};
pub use session::{check_session, session_outcome, SessionError};
