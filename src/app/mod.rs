//! Application layer: command line, configuration, the ping-pong demo and
//! process startup

pub mod cli;
pub mod ping_pong;
pub mod startup;
