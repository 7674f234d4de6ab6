pub mod whoami; // GET /auth/whoami - current account

pub use whoami::whoami_get;
