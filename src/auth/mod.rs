//! Sign-in against the remote API and the client session cookie.
//!
//! Credentials are checked by the remote service; this module only keeps
//! the resulting profile in a [`ClientSession`](crate::session::ClientSession).

pub mod handlers;
pub mod middleware;

pub use handlers::*;
pub use middleware::{AuthContext, OptionalAuth, SESSION_COOKIE_NAME};
