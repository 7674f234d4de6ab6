// handlers/public/auth/mod.rs - Token acquisition

pub mod refresh; // POST /auth/refresh - exchange a refresh token for an access token
pub mod signin; // POST /auth/signin - check credentials, issue a token pair
pub mod signup; // POST /auth/signup - create an account
pub mod utils;

pub use refresh::refresh_post;
pub use signin::signin_post;
pub use signup::signup_post;
