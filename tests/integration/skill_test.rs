//! Skill endpoint integration tests
//!
//! Drives the full router and the direct-invocation handler with platform
//! envelopes: launch, query relay, session lifecycle and rejections.

#![allow(dead_code)]

mod common;
mod endpoint;
mod invocation;
mod launch;
mod query;
