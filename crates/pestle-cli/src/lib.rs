//! Pestle CLI library
//!
//! Exposes the argument definitions and command implementations so
//! integration tests can drive them without spawning the binary.

pub mod cli;
pub mod commands;
