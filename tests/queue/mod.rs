//! Queue Integration Test Modules

pub mod messaging;
pub mod ping_pong;
