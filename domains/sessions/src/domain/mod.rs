//! Sessions domain layer: entities, state machine, spoken replies

pub mod entities;
pub mod speech;
pub mod state;
