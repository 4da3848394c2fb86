//! Skill event handlers

pub mod fallback;
pub mod launch;
pub mod query;
pub mod skill;
