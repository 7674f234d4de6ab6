// handlers/public/mod.rs - Handlers reachable without an access token
//
// Auth endpoints hand out tokens. The feedback endpoint works anonymously and
// only uses the caller's identity, when one is supplied, to save the result.

pub mod auth;
pub mod feedback;

pub use auth::{refresh_post, signin_post, signup_post};
pub use feedback::feedback_post;
