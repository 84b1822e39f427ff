//! Auth feature
//!
//! Admin login/logout and session introspection over the session store in
//! [`crate::auth`].

pub mod commands;
pub mod routes;
