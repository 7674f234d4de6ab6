// handlers/protected/entries/mod.rs - Reflection entry CRUD
//
// Collection operations live on /entries, single-record operations on
// /entries/:id. Entries belonging to other accounts behave as if they did not
// exist.

pub mod collection; // GET, POST /entries
pub mod record; // GET, PUT, PATCH, DELETE /entries/:id
pub mod utils;

pub use collection::{entries_list, entry_create};
pub use record::{entry_delete, entry_get, entry_patch, entry_put};
