//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller's profile identity from a Bearer token.
//! - [`access::RequireRequester`] -- Requires a `requester` profile.
//! - [`access::RequireActiveFulfiller`] -- Requires a `fulfiller` profile with an active subscription.

pub mod access;
pub mod auth;
