// handlers/mod.rs - Two-tier handler layout
//
// Public (no token, or an optional one) → Protected (access token required)

pub mod protected; // /entries/*, /auth/whoami
pub mod public; // /auth/signup, /auth/signin, /auth/refresh, /feedback
pub mod system; // /, /health

pub use system::{health, root};
