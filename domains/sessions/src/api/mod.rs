//! API layer for the Sessions domain
//!
//! Contains the platform envelope types, the event dispatcher, HTTP handlers,
//! routes, and domain state definition.

pub mod dispatch;
pub mod envelope;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::SkillState;
pub use routes::routes;
