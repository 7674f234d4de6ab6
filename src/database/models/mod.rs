pub mod account;
pub mod entry;

pub use account::{Account, AccountId, NewAccount};
pub use entry::{Entry, EntryChanges, EntryId, NewEntry};
