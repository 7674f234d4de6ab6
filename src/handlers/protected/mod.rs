// handlers/protected/mod.rs - Handlers that run behind jwt_auth_middleware
//
// Every handler here reads `AuthUser` from the request extensions and passes
// the account id down explicitly.

pub mod auth;
pub mod entries;

pub use auth::whoami_get;
pub use entries::{entries_list, entry_create, entry_delete, entry_get, entry_patch, entry_put};
