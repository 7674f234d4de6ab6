pub mod auth;
pub mod json;
pub mod response;

pub use auth::{jwt_auth_middleware, optional_jwt_auth_middleware, AuthUser};
pub use json::JsonBody;
pub use response::{ApiResponse, ApiResult};
