// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Profile browsing, the GitHub repository lookup, and service status.

pub mod github;
pub mod profile;
pub mod system;
