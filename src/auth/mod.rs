//! Authentication: one shared account and a cookie session.
//!
//! Two states, anonymous and authenticated. A successful login sets the
//! session cookie; logout or cookie expiry returns to anonymous. The
//! [`gate`] decides which requests need the authenticated state.

pub mod credentials;
pub mod gate;
pub mod session;

pub use credentials::{CredentialVerifier, StaticCredentials};
pub use gate::{Protection, classify, session_gate};
pub use session::{SESSION_COOKIE, SessionPolicy, is_authenticated};
