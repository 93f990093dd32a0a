// handlers/mod.rs - Handlers grouped by security tier
//
// Public (no auth) → Protected (JWT auth). Both tiers share the
// /api/profile prefix; the router in app.rs decides which routes get
// the JWT middleware.
pub mod public;    // No authentication required
pub mod protected; // JWT authentication required
