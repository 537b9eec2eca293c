// Shared helpers for the integration test crates. Each topic file pulls
// this in with `#[path = "../common/mod.rs"] mod common;`.
#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;
