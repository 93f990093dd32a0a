// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every handler here receives the caller as `Extension<AuthUser>`, inserted
// by `middleware::auth::jwt_auth_middleware`.

pub mod education;
pub mod experience;
pub mod profile;
